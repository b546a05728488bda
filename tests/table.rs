//! Round orchestration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use bjtable::{
    AckError, Card, Dealer, Dealt, FlatBettor, Hand, InterruptPolicy, Participant, Phase,
    PhaseSignal, PlayerActor, PlayerId, Recipient, RosterError, RosterPolicy, RosterUpdate,
    RoundError, RoundPhase, Shoe, ShoeError, Strategy, Suit, Table, TableOptions, Turn,
};

const SIGNAL_WAIT: Duration = Duration::from_secs(5);

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

/// Bets the minimum, stands on the dealt hand, and plays `rounds` rounds.
struct Stand {
    rounds: u32,
    insure_on_ace: bool,
}

impl Stand {
    const fn rounds(rounds: u32) -> Self {
        Self {
            rounds,
            insure_on_ace: false,
        }
    }
}

impl Strategy for Stand {
    fn place_bet(&mut self, minimum_bet: usize) -> usize {
        minimum_bet
    }

    fn decide_insurance(&mut self, _hand: &Hand, dealer_up: Card) -> bool {
        self.insure_on_ace && dealer_up.is_ace()
    }

    fn take_turn(&mut self, _hand: &mut Hand, _turn: &mut Turn<'_>) -> Result<(), ShoeError> {
        Ok(())
    }

    fn decide_continue(&mut self, _hand: &Hand, _dealer: &Hand) -> bool {
        self.rounds = self.rounds.saturating_sub(1);
        self.rounds > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Ready(usize),
    Turn(PlayerId),
}

/// Takes `delay` to get ready for its turn and records when it did.
struct SlowPrep {
    seat: usize,
    delay: Duration,
    log: Arc<Mutex<Vec<Event>>>,
}

impl Strategy for SlowPrep {
    fn place_bet(&mut self, minimum_bet: usize) -> usize {
        minimum_bet
    }

    fn decide_insurance(&mut self, _hand: &Hand, _dealer_up: Card) -> bool {
        false
    }

    fn prepare_turn(&mut self, _hand: &Hand) {
        thread::sleep(self.delay);
        self.log.lock().unwrap().push(Event::Ready(self.seat));
    }

    fn take_turn(&mut self, _hand: &mut Hand, turn: &mut Turn<'_>) -> Result<(), ShoeError> {
        self.log.lock().unwrap().push(Event::Turn(turn.player()));
        Ok(())
    }

    fn decide_continue(&mut self, _hand: &Hand, _dealer: &Hand) -> bool {
        false
    }
}

/// A participant driven by hand from the test thread.
struct Manual {
    id: PlayerId,
    signals: Mutex<mpsc::Sender<PhaseSignal>>,
    hand: Mutex<Hand>,
    turns: AtomicUsize,
}

impl Participant for Manual {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn signal(&self, signal: PhaseSignal) {
        if matches!(signal, PhaseSignal::RoundBegins { .. }) {
            self.hand.lock().unwrap().clear();
        }
        let _ = self.signals.lock().unwrap().send(signal);
    }

    fn receive_card(&self, card: Card) {
        self.hand.lock().unwrap().add_card(card);
    }

    fn hand(&self) -> Hand {
        self.hand.lock().unwrap().clone()
    }

    fn take_turn(&self, _turn: &mut Turn<'_>) -> Result<(), ShoeError> {
        self.turns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn manual(table: &Table) -> (Arc<Manual>, mpsc::Receiver<PhaseSignal>) {
    let (tx, rx) = mpsc::channel();
    let player = Arc::new(Manual {
        id: table.next_player_id(),
        signals: Mutex::new(tx),
        hand: Mutex::new(Hand::new()),
        turns: AtomicUsize::new(0),
    });
    (player, rx)
}

fn seat_manual(table: &Table) -> (Arc<Manual>, mpsc::Receiver<PhaseSignal>) {
    let (player, rx) = manual(table);
    assert_eq!(
        table.add_player(player.clone()),
        Ok(RosterUpdate::Applied)
    );
    (player, rx)
}

fn next_signal(rx: &mpsc::Receiver<PhaseSignal>) -> PhaseSignal {
    rx.recv_timeout(SIGNAL_WAIT).expect("dealer signal")
}

fn wait_for_unseated(rx: &mpsc::Receiver<PhaseSignal>) {
    while next_signal(rx) != PhaseSignal::Unseated {}
}

fn wait_for_phase(table: &Table, phase: RoundPhase) {
    let deadline = Instant::now() + SIGNAL_WAIT;
    while table.phase() != phase {
        assert!(Instant::now() < deadline, "dealer never reached {phase:?}");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn initial_deal_alternates_dealer_and_players() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let players: Vec<_> = (0..3)
        .map(|_| PlayerActor::spawn(&table, Stand::rounds(1)).unwrap())
        .collect();
    let ids: Vec<PlayerId> = players.iter().map(|(player, _)| player.id()).collect();

    let top = [
        card(Suit::Spades, 10),
        card(Suit::Hearts, 2),
        card(Suit::Hearts, 3),
        card(Suit::Hearts, 4),
        card(Suit::Clubs, 9),
        card(Suit::Diamonds, 5),
        card(Suit::Diamonds, 6),
        card(Suit::Diamonds, 8),
    ];
    let mut dealer = Dealer::with_shoe(Arc::clone(&table), Shoe::with_top_cards(6, 7, &top));
    let report = dealer.play_round().unwrap();

    let recipients = [
        Recipient::Dealer,
        Recipient::Player(ids[0]),
        Recipient::Player(ids[1]),
        Recipient::Player(ids[2]),
        Recipient::Dealer,
        Recipient::Player(ids[0]),
        Recipient::Player(ids[1]),
        Recipient::Player(ids[2]),
    ];
    let expected: Vec<Dealt> = recipients
        .into_iter()
        .zip(top)
        .map(|(recipient, card)| Dealt { recipient, card })
        .collect();

    assert_eq!(report.seated, ids);
    assert_eq!(report.dealt, expected);
    assert_eq!(report.dealer.value(), 19);
    assert!(!report.dealer_has_blackjack);
    assert_eq!(dealer.remaining_cards(), 312 - 8);
    assert_eq!(table.dealer_shown_card(), Some(card(Suit::Spades, 10)));

    for (index, (player, _)) in players.iter().enumerate() {
        assert_eq!(player.hand().cards(), [top[index + 1], top[index + 5]]);
    }
    for (_, handle) in players {
        assert_eq!(handle.join().unwrap().rounds_played, 1);
    }
    assert_eq!(table.player_count(), 0);
}

#[test]
fn dealer_blackjack_is_flagged_after_the_deal() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let (player, handle) = PlayerActor::spawn(
        &table,
        Stand {
            rounds: 1,
            insure_on_ace: true,
        },
    )
    .unwrap();

    let top = [
        card(Suit::Spades, 1),
        card(Suit::Hearts, 5),
        card(Suit::Diamonds, 13),
        card(Suit::Hearts, 6),
    ];
    let mut dealer = Dealer::with_shoe(Arc::clone(&table), Shoe::with_top_cards(6, 1, &top));
    let report = dealer.play_round().unwrap();

    assert!(report.dealer_has_blackjack);
    assert!(table.dealer_has_blackjack());
    assert_eq!(table.dealer_shown_card(), Some(card(Suit::Spades, 1)));
    assert_eq!(table.dealer_hand().value(), 21);
    assert_eq!(report.cards_for(Recipient::Dealer).len(), 2);
    assert_eq!(report.insured, [player.id()]);
    assert_eq!(report.bets, [(player.id(), 500)]);

    handle.join().unwrap();
}

#[test]
fn dealer_hits_soft_seventeen() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let (player, handle) = PlayerActor::spawn(&table, Stand::rounds(1)).unwrap();

    let top = [
        card(Suit::Spades, 1),
        card(Suit::Hearts, 9),
        card(Suit::Diamonds, 6),
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 4),
    ];
    let mut dealer = Dealer::with_shoe(Arc::clone(&table), Shoe::with_top_cards(6, 2, &top));
    let report = dealer.play_round().unwrap();

    assert!(!report.dealer_has_blackjack);
    assert_eq!(
        report.cards_for(Recipient::Dealer),
        [top[0], top[2], top[4]]
    );
    assert_eq!(report.dealer.value(), 21);
    assert_eq!(report.cards_for(Recipient::Player(player.id())).len(), 2);

    handle.join().unwrap();
}

#[test]
fn setup_reshuffles_only_below_threshold() {
    for (dealt_before, reshuffled) in [(235, true), (234, false)] {
        let table = Arc::new(Table::new(TableOptions::default()));
        let (_player, handle) = PlayerActor::spawn(&table, FlatBettor::new(1)).unwrap();

        let mut shoe = Shoe::new(6, 3);
        for _ in 0..dealt_before {
            shoe.deal_card().unwrap();
        }
        let remaining = shoe.remaining_cards();

        let mut dealer = Dealer::with_shoe(Arc::clone(&table), shoe);
        let report = dealer.play_round().unwrap();

        assert_eq!(report.reshuffled, reshuffled);
        let start = if reshuffled { 312 } else { remaining };
        assert_eq!(dealer.remaining_cards(), start - report.dealt.len());

        handle.join().unwrap();
    }
}

#[test]
fn turns_wait_for_every_ready_signal() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let log = Arc::new(Mutex::new(Vec::new()));
    let delays = [60, 5, 30];

    let players: Vec<_> = delays
        .iter()
        .enumerate()
        .map(|(seat, &millis)| {
            PlayerActor::spawn(
                &table,
                SlowPrep {
                    seat,
                    delay: Duration::from_millis(millis),
                    log: Arc::clone(&log),
                },
            )
            .unwrap()
        })
        .collect();
    let ids: Vec<PlayerId> = players.iter().map(|(player, _)| player.id()).collect();

    let mut dealer = Dealer::new(Arc::clone(&table), 17);
    let report = dealer.play_round().unwrap();
    assert!(report.forced.is_empty());

    let log = log.lock().unwrap().clone();
    assert_eq!(log.len(), 6);
    let mut ready: Vec<usize> = log[..3]
        .iter()
        .map(|event| match event {
            Event::Ready(seat) => *seat,
            Event::Turn(player) => panic!("{player} took a turn before everyone was ready"),
        })
        .collect();
    ready.sort_unstable();
    assert_eq!(ready, [0, 1, 2]);
    assert_eq!(
        log[3..],
        [Event::Turn(ids[0]), Event::Turn(ids[1]), Event::Turn(ids[2])]
    );

    for (_, handle) in players {
        handle.join().unwrap();
    }
}

#[test]
fn run_stops_when_everyone_leaves() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let players: Vec<_> = (0..2)
        .map(|_| PlayerActor::spawn(&table, FlatBettor::new(3)).unwrap())
        .collect();

    let rounds = Dealer::new(Arc::clone(&table), 5).run().unwrap();
    assert_eq!(rounds, 3);
    assert!(table.is_halted());
    assert_eq!(table.phase(), RoundPhase::Halted);

    for (_, handle) in players {
        let summary = handle.join().unwrap();
        assert_eq!(summary.rounds_played, 3);
        assert_eq!(summary.last_bet, 500);
    }

    assert_eq!(
        PlayerActor::spawn(&table, FlatBettor::new(1)).err(),
        Some(RosterError::Closed)
    );
}

#[test]
fn run_plays_nothing_once_the_roster_empties_between_rounds() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let (first, first_rx) = seat_manual(&table);
    let (second, second_rx) = seat_manual(&table);

    assert_eq!(table.remove_player(first.id()), Ok(RosterUpdate::Applied));
    assert_eq!(table.remove_player(second.id()), Ok(RosterUpdate::Applied));
    assert_eq!(next_signal(&first_rx), PhaseSignal::Unseated);
    assert_eq!(next_signal(&second_rx), PhaseSignal::Unseated);

    let dealer = Dealer::new(Arc::clone(&table), 5);
    assert_eq!(dealer.run(), Ok(0));
    assert!(table.is_halted());
}

#[test]
fn acknowledgments_are_counted_once_and_roster_changes_wait() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let (a, a_rx) = seat_manual(&table);
    let (b, b_rx) = seat_manual(&table);

    assert_eq!(table.placed_bet(a.id(), 500), Err(AckError::NoRoundInProgress));

    let mut dealer = Dealer::new(Arc::clone(&table), 1);
    let round = thread::spawn(move || dealer.play_round());

    assert_eq!(next_signal(&a_rx), PhaseSignal::RoundBegins { minimum_bet: 500 });
    assert_eq!(next_signal(&b_rx), PhaseSignal::RoundBegins { minimum_bet: 500 });

    let (late, late_rx) = manual(&table);
    assert_eq!(table.add_player(late.clone()), Ok(RosterUpdate::Deferred));
    assert_eq!(table.add_player(late.clone()), Err(RosterError::AlreadySeated));
    assert_eq!(table.placed_bet(late.id(), 500), Err(AckError::NotInRound));
    assert_eq!(table.remove_player(b.id()), Ok(RosterUpdate::Deferred));
    assert_eq!(table.player_count(), 2);

    table.placed_bet(a.id(), 500).unwrap();
    assert_eq!(table.placed_bet(a.id(), 500), Err(AckError::Duplicate));
    table.placed_bet(b.id(), 1000).unwrap();

    for rx in [&a_rx, &b_rx] {
        assert_eq!(next_signal(rx), PhaseSignal::BetsClosed);
        assert!(matches!(next_signal(rx), PhaseSignal::CardsDealt { .. }));
    }
    assert_eq!(a.hand().len(), 2);
    assert_eq!(b.hand().len(), 2);

    table.insurance_decided(a.id(), false).unwrap();
    table.insurance_decided(b.id(), true).unwrap();
    assert_eq!(
        table.insurance_decided(b.id(), false),
        Err(AckError::Duplicate)
    );

    for rx in [&a_rx, &b_rx] {
        assert!(matches!(
            next_signal(rx),
            PhaseSignal::InsuranceResolved { .. }
        ));
    }
    table.turn_ready(a.id()).unwrap();
    table.turn_ready(b.id()).unwrap();

    for rx in [&a_rx, &b_rx] {
        assert!(matches!(next_signal(rx), PhaseSignal::DealerDone { .. }));
    }
    table.continue_decided(a.id(), true).unwrap();
    table.continue_decided(b.id(), true).unwrap();

    let report = round.join().unwrap().unwrap();
    assert_eq!(report.seated, [a.id(), b.id()]);
    assert_eq!(report.bets, [(a.id(), 500), (b.id(), 1000)]);
    assert_eq!(report.insured, [b.id()]);
    assert!(report.leaving.is_empty());

    assert_eq!(next_signal(&b_rx), PhaseSignal::Unseated);
    assert_eq!(table.players(), [a.id(), late.id()]);
    assert_eq!(table.phase(), RoundPhase::Idle);
    assert!(late_rx.try_recv().is_err());
}

#[test]
fn reject_policy_refuses_mid_round_changes() {
    let options = TableOptions::default().with_roster_policy(RosterPolicy::Reject);
    let table = Arc::new(Table::new(options));
    let (a, a_rx) = seat_manual(&table);

    let mut dealer = Dealer::new(Arc::clone(&table), 4);
    let round = thread::spawn(move || dealer.play_round());
    assert!(matches!(
        next_signal(&a_rx),
        PhaseSignal::RoundBegins { .. }
    ));

    let (late, _late_rx) = manual(&table);
    assert_eq!(table.add_player(late), Err(RosterError::RoundInProgress));
    assert_eq!(table.remove_player(a.id()), Err(RosterError::RoundInProgress));

    table.placed_bet(a.id(), 500).unwrap();
    table.insurance_decided(a.id(), false).unwrap();
    table.turn_ready(a.id()).unwrap();
    table.continue_decided(a.id(), false).unwrap();

    let report = round.join().unwrap().unwrap();
    assert_eq!(report.leaving, [a.id()]);
    assert_eq!(table.player_count(), 0);
    wait_for_unseated(&a_rx);
}

#[test]
fn missed_bet_deadline_sits_the_player_out() {
    let options = TableOptions::default().with_phase_timeout(Duration::from_millis(300));
    let table = Arc::new(Table::new(options));
    let (silent, silent_rx) = seat_manual(&table);
    let (active, handle) = PlayerActor::spawn(&table, Stand::rounds(1)).unwrap();

    let mut dealer = Dealer::new(Arc::clone(&table), 12);
    let report = dealer.play_round().unwrap();

    assert!(report.was_forced(silent.id(), Phase::Bet));
    assert_eq!(report.forced.len(), 1);
    assert!(report.cards_for(Recipient::Player(silent.id())).is_empty());
    assert_eq!(report.cards_for(Recipient::Player(active.id())).len(), 2);
    assert!(silent.hand().is_empty());

    assert!(matches!(
        next_signal(&silent_rx),
        PhaseSignal::RoundBegins { .. }
    ));
    assert_eq!(next_signal(&silent_rx), PhaseSignal::SatOut);
    assert_eq!(table.placed_bet(silent.id(), 500), Err(AckError::NoRoundInProgress));

    handle.join().unwrap();
    assert_eq!(table.players(), [silent.id()]);
}

#[test]
fn missed_continue_deadline_leaves_the_table() {
    let options = TableOptions::default().with_phase_timeout(Duration::from_millis(500));
    let table = Arc::new(Table::new(options));
    let (player, rx) = seat_manual(&table);

    let mut dealer = Dealer::new(Arc::clone(&table), 8);
    let round = thread::spawn(move || dealer.play_round());

    assert!(matches!(next_signal(&rx), PhaseSignal::RoundBegins { .. }));
    table.placed_bet(player.id(), 500).unwrap();
    assert_eq!(next_signal(&rx), PhaseSignal::BetsClosed);
    assert!(matches!(next_signal(&rx), PhaseSignal::CardsDealt { .. }));
    table.insurance_decided(player.id(), false).unwrap();
    assert!(matches!(
        next_signal(&rx),
        PhaseSignal::InsuranceResolved { .. }
    ));
    table.turn_ready(player.id()).unwrap();
    assert!(matches!(next_signal(&rx), PhaseSignal::DealerDone { .. }));

    let report = round.join().unwrap().unwrap();
    assert!(report.was_forced(player.id(), Phase::Continue));
    assert_eq!(report.leaving, [player.id()]);
    assert_eq!(next_signal(&rx), PhaseSignal::Unseated);
    assert_eq!(table.player_count(), 0);
}

#[test]
fn missed_insurance_deadline_declines() {
    let options = TableOptions::default().with_phase_timeout(Duration::from_millis(500));
    let table = Arc::new(Table::new(options));
    let (player, rx) = seat_manual(&table);

    let mut dealer = Dealer::new(Arc::clone(&table), 31);
    let round = thread::spawn(move || dealer.play_round());

    assert!(matches!(next_signal(&rx), PhaseSignal::RoundBegins { .. }));
    table.placed_bet(player.id(), 500).unwrap();
    assert_eq!(next_signal(&rx), PhaseSignal::BetsClosed);
    assert!(matches!(next_signal(&rx), PhaseSignal::CardsDealt { .. }));
    assert!(matches!(
        next_signal(&rx),
        PhaseSignal::InsuranceResolved { .. }
    ));
    assert_eq!(
        table.insurance_decided(player.id(), true),
        Err(AckError::PhaseClosed)
    );
    table.turn_ready(player.id()).unwrap();
    assert!(matches!(next_signal(&rx), PhaseSignal::DealerDone { .. }));
    table.continue_decided(player.id(), true).unwrap();

    let report = round.join().unwrap().unwrap();
    assert!(report.was_forced(player.id(), Phase::Insurance));
    assert_eq!(report.forced.len(), 1);
    assert!(report.insured.is_empty());
    assert_eq!(player.turns.load(Ordering::SeqCst), 1);
    assert_eq!(table.players(), [player.id()]);
}

#[test]
fn missed_turn_ready_deadline_stands() {
    let options = TableOptions::default().with_phase_timeout(Duration::from_millis(500));
    let table = Arc::new(Table::new(options));
    let (player, rx) = seat_manual(&table);

    let mut dealer = Dealer::new(Arc::clone(&table), 32);
    let round = thread::spawn(move || dealer.play_round());

    assert!(matches!(next_signal(&rx), PhaseSignal::RoundBegins { .. }));
    table.placed_bet(player.id(), 500).unwrap();
    assert_eq!(next_signal(&rx), PhaseSignal::BetsClosed);
    assert!(matches!(next_signal(&rx), PhaseSignal::CardsDealt { .. }));
    table.insurance_decided(player.id(), false).unwrap();
    assert!(matches!(
        next_signal(&rx),
        PhaseSignal::InsuranceResolved { .. }
    ));
    assert!(matches!(next_signal(&rx), PhaseSignal::DealerDone { .. }));
    table.continue_decided(player.id(), true).unwrap();

    let report = round.join().unwrap().unwrap();
    assert!(report.was_forced(player.id(), Phase::TurnReady));
    assert_eq!(report.forced.len(), 1);
    assert_eq!(player.turns.load(Ordering::SeqCst), 0);
    assert_eq!(player.hand().len(), 2);
    assert_eq!(report.cards_for(Recipient::Player(player.id())).len(), 2);
    assert_eq!(
        table.turn_ready(player.id()),
        Err(AckError::NoRoundInProgress)
    );
}

#[test]
fn interrupted_turn_ready_skips_unready_players() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let log = Arc::new(Mutex::new(Vec::new()));
    let (player, handle) = PlayerActor::spawn(
        &table,
        SlowPrep {
            seat: 0,
            delay: Duration::from_secs(2),
            log: Arc::clone(&log),
        },
    )
    .unwrap();

    let mut dealer = Dealer::new(Arc::clone(&table), 33);
    let round = thread::spawn(move || dealer.play_round());

    wait_for_phase(&table, RoundPhase::AwaitTurnReady);
    let interrupted_at = Instant::now();
    assert!(table.interrupt());
    wait_for_phase(&table, RoundPhase::AwaitRoundEnd);
    assert!(interrupted_at.elapsed() < Duration::from_secs(1));

    let report = round.join().unwrap().unwrap();
    assert_eq!(report.interrupted, [Phase::TurnReady]);
    assert!(report.forced.is_empty());
    assert_eq!(report.cards_for(Recipient::Player(player.id())).len(), 2);

    handle.join().unwrap();
    assert_eq!(*log.lock().unwrap(), [Event::Ready(0)]);
}

#[test]
fn playing_an_empty_table_closes_it() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let mut dealer = Dealer::new(Arc::clone(&table), 3);

    assert_eq!(dealer.play_round(), Err(RoundError::TableEmpty));
    assert_eq!(dealer.rounds_played(), 0);
    assert!(table.is_halted());
    assert_eq!(table.phase(), RoundPhase::Halted);

    let (player, _rx) = manual(&table);
    assert_eq!(table.add_player(player), Err(RosterError::Closed));
}

#[test]
fn interrupted_wait_aborts_under_abort_policy() {
    let options = TableOptions::default().with_on_interrupt(InterruptPolicy::Abort);
    let table = Arc::new(Table::new(options));
    let (_player, rx) = seat_manual(&table);

    let mut dealer = Dealer::new(Arc::clone(&table), 6);
    let round = thread::spawn(move || dealer.play_round());

    assert!(matches!(next_signal(&rx), PhaseSignal::RoundBegins { .. }));
    wait_for_phase(&table, RoundPhase::AwaitBets);
    assert!(table.interrupt());

    assert_eq!(
        round.join().unwrap(),
        Err(RoundError::Interrupted(Phase::Bet))
    );
    assert!(table.is_halted());
    assert_eq!(next_signal(&rx), PhaseSignal::Unseated);
}

#[test]
fn interrupted_wait_proceeds_under_proceed_policy() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let (silent, _rx) = seat_manual(&table);

    let mut dealer = Dealer::new(Arc::clone(&table), 6);
    let round = thread::spawn(move || dealer.play_round());

    let deadline = Instant::now() + SIGNAL_WAIT;
    while !round.is_finished() {
        assert!(Instant::now() < deadline, "round never finished");
        if table.phase().awaiting().is_some() {
            table.interrupt();
        }
        thread::sleep(Duration::from_millis(1));
    }

    let report = round.join().unwrap().unwrap();
    assert_eq!(
        report.interrupted,
        [Phase::Bet, Phase::Insurance, Phase::TurnReady, Phase::Continue]
    );
    assert!(report.forced.is_empty());
    assert_eq!(report.bets, [(silent.id(), 0)]);
    assert_eq!(report.cards_for(Recipient::Player(silent.id())).len(), 2);
    assert_eq!(table.players(), [silent.id()]);
    assert!(!table.is_halted());
}

#[test]
fn empty_shoe_is_fatal() {
    let table = Arc::new(Table::new(TableOptions::default()));
    let (_player, handle) = PlayerActor::spawn(&table, FlatBettor::new(5)).unwrap();

    let mut dealer = Dealer::with_shoe(Arc::clone(&table), Shoe::new(0, 1));
    assert_eq!(dealer.play_round(), Err(RoundError::EmptyShoe));
    assert!(table.is_halted());

    assert_eq!(handle.join().unwrap().rounds_played, 0);
}
