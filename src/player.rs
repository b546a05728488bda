//! Players as the dealer sees them, and a thread harness that runs a
//! [`Strategy`] as an independent player.

use alloc::sync::Arc;
use core::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::card::Card;
use crate::error::{AckError, RosterError, ShoeError};
use crate::hand::Hand;
use crate::strategy::Strategy;
use crate::sync::Mutex;
use crate::table::{Phase, Table, Turn};

/// Identifies a player at a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Wake-ups sent by the dealer, one per phase boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseSignal {
    /// A round has started; place a bet and acknowledge it.
    RoundBegins {
        /// Table minimum.
        minimum_bet: usize,
    },
    /// Every bet is in.
    BetsClosed,
    /// The initial two cards are out; decide on insurance and acknowledge it.
    CardsDealt {
        /// The dealer's face-up card.
        dealer_up: Card,
    },
    /// Insurance is settled; acknowledge when ready for your turn.
    InsuranceResolved {
        /// Whether the dealer holds a natural.
        dealer_has_blackjack: bool,
    },
    /// The dealer finished drawing; decide whether to stay and acknowledge it.
    DealerDone {
        /// The dealer's final hand.
        dealer: Hand,
    },
    /// The player missed the betting deadline and sits this round out.
    SatOut,
    /// The player no longer has a seat.
    Unseated,
}

/// A seated player, as consumed by the dealer.
///
/// Every method is called from the dealer's thread and must not block on
/// the table; decisions happen on the player's own thread in response to
/// [`signal`](Self::signal), and are reported back through the table's
/// acknowledgment methods.
pub trait Participant: Send + Sync {
    /// The player's id.
    fn id(&self) -> PlayerId;

    /// Wakes the player for the next phase.
    ///
    /// On [`PhaseSignal::RoundBegins`] the player must start a fresh, empty
    /// hand before this returns.
    fn signal(&self, signal: PhaseSignal);

    /// Adds an initial card to the player's hand.
    fn receive_card(&self, card: Card);

    /// Returns a copy of the player's hand.
    fn hand(&self) -> Hand;

    /// Plays the player's hand, drawing from the shoe through `turn`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shoe runs out.
    fn take_turn(&self, turn: &mut Turn<'_>) -> Result<(), ShoeError>;
}

/// What a player actor did before leaving the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSummary {
    /// The player's id.
    pub id: PlayerId,
    /// Rounds played through to the dealer's turn.
    pub rounds_played: u32,
    /// The most recent bet placed.
    pub last_bet: usize,
}

#[derive(Debug, Default)]
struct Seat {
    hand: Hand,
    bet: usize,
    insured: bool,
}

/// Runs a [`Strategy`] on its own thread as a seated player.
///
/// The actor answers each [`PhaseSignal`] by asking its strategy for a
/// decision and acknowledging the phase at the table. Its turn is played on
/// the dealer's thread through [`Participant::take_turn`].
pub struct PlayerActor<S> {
    id: PlayerId,
    inbox: Sender<PhaseSignal>,
    seat: Mutex<Seat>,
    strategy: Mutex<S>,
}

impl<S: Strategy + 'static> PlayerActor<S> {
    /// Seats a new player running `strategy` and starts its thread.
    ///
    /// If a round is in progress the seat is taken at the next round, or
    /// refused, depending on the table's roster policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the table refuses the player.
    pub fn spawn(
        table: &Arc<Table>,
        strategy: S,
    ) -> Result<(Arc<Self>, JoinHandle<PlayerSummary>), RosterError> {
        let (inbox, signals) = mpsc::channel();
        let actor = Arc::new(Self {
            id: table.next_player_id(),
            inbox,
            seat: Mutex::new(Seat::default()),
            strategy: Mutex::new(strategy),
        });

        table.add_player(Arc::clone(&actor) as Arc<dyn Participant>)?;

        let worker = Arc::clone(&actor);
        let table = Arc::clone(table);
        let handle = thread::spawn(move || worker.run(&table, &signals));
        Ok((actor, handle))
    }
}

impl<S: Strategy> PlayerActor<S> {
    /// Returns the bet placed this round.
    #[must_use]
    pub fn bet(&self) -> usize {
        self.seat.lock().bet
    }

    /// Returns whether the player took insurance this round.
    #[must_use]
    pub fn insured(&self) -> bool {
        self.seat.lock().insured
    }

    fn run(&self, table: &Table, signals: &Receiver<PhaseSignal>) -> PlayerSummary {
        let mut rounds_played = 0;

        while let Ok(signal) = signals.recv() {
            match signal {
                PhaseSignal::RoundBegins { minimum_bet } => {
                    let bet = {
                        let mut strategy = self.strategy.lock();
                        strategy.begin_round();
                        strategy.place_bet(minimum_bet)
                    };
                    self.seat.lock().bet = bet;
                    self.acknowledged(Phase::Bet, table.placed_bet(self.id, bet));
                }
                PhaseSignal::BetsClosed => {}
                PhaseSignal::CardsDealt { dealer_up } => {
                    let hand = self.hand();
                    let insured = self.strategy.lock().decide_insurance(&hand, dealer_up);
                    self.seat.lock().insured = insured;
                    self.acknowledged(Phase::Insurance, table.insurance_decided(self.id, insured));
                }
                PhaseSignal::InsuranceResolved { .. } => {
                    let hand = self.hand();
                    self.strategy.lock().prepare_turn(&hand);
                    self.acknowledged(Phase::TurnReady, table.turn_ready(self.id));
                }
                PhaseSignal::DealerDone { dealer } => {
                    rounds_played += 1;
                    let hand = self.hand();
                    let stay = self.strategy.lock().decide_continue(&hand, &dealer);
                    self.acknowledged(Phase::Continue, table.continue_decided(self.id, stay));
                }
                PhaseSignal::SatOut => debug!("{} sits out this round", self.id),
                PhaseSignal::Unseated => break,
            }
        }

        debug!("{} left after {rounds_played} rounds", self.id);
        PlayerSummary {
            id: self.id,
            rounds_played,
            last_bet: self.bet(),
        }
    }

    fn acknowledged(&self, phase: Phase, result: Result<(), AckError>) {
        if let Err(err) = result {
            warn!("{} could not acknowledge {phase}: {err}", self.id);
        }
    }
}

impl<S: Strategy> Participant for PlayerActor<S> {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn signal(&self, signal: PhaseSignal) {
        if matches!(signal, PhaseSignal::RoundBegins { .. }) {
            *self.seat.lock() = Seat::default();
        }
        if self.inbox.send(signal).is_err() {
            debug!("{} is no longer listening", self.id);
        }
    }

    fn receive_card(&self, card: Card) {
        self.seat.lock().hand.add_card(card);
    }

    fn hand(&self) -> Hand {
        self.seat.lock().hand.clone()
    }

    fn take_turn(&self, turn: &mut Turn<'_>) -> Result<(), ShoeError> {
        let mut hand = self.hand();
        let result = self.strategy.lock().take_turn(&mut hand, turn);
        self.seat.lock().hand = hand;
        result
    }
}
