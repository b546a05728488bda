use alloc::sync::Arc;
use alloc::vec::Vec;

use log::{debug, error, info, trace, warn};

use crate::card::Card;
use crate::error::{RoundError, ShoeError};
use crate::hand::{BLACKJACK, Hand};
use crate::options::InterruptPolicy;
use crate::player::{Participant, PhaseSignal, PlayerId};
use crate::shoe::Shoe;
use crate::sync::{CloseReason, Closed, PhaseBarrier};

use super::round::RoundBarriers;
use super::{Dealt, ForcedDecision, Phase, Recipient, RoundPhase, RoundReport, Table, Turn};

/// The dealer stands on this value unless the hand is soft.
pub const DEALER_STAND_VALUE: u8 = 17;

/// Returns whether the dealer must draw to `hand`.
///
/// The dealer draws below 17 and on soft 17.
#[must_use]
pub fn must_draw(hand: &Hand) -> bool {
    let value = hand.value();
    value < DEALER_STAND_VALUE || (value == DEALER_STAND_VALUE && hand.is_soft())
}

/// Runs rounds at a [`Table`].
///
/// The dealer owns the shoe and its own hand outright; players only reach
/// the shoe through the [`Turn`] handed to them during their turn.
pub struct Dealer {
    table: Arc<Table>,
    shoe: Shoe,
    hand: Hand,
    has_blackjack: bool,
    rounds: u64,
}

impl Dealer {
    /// Creates a dealer for `table` with a freshly shuffled shoe.
    #[must_use]
    pub fn new(table: Arc<Table>, seed: u64) -> Self {
        let shoe = Shoe::new(table.options().decks, seed);
        Self::with_shoe(table, shoe)
    }

    /// Creates a dealer for `table` that deals from `shoe`.
    #[must_use]
    pub const fn with_shoe(table: Arc<Table>, shoe: Shoe) -> Self {
        Self {
            table,
            shoe,
            hand: Hand::new(),
            has_blackjack: false,
            rounds: 0,
        }
    }

    /// Returns the table this dealer runs.
    #[must_use]
    pub const fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Returns the number of cards left in the shoe.
    #[must_use]
    pub fn remaining_cards(&self) -> usize {
        self.shoe.remaining_cards()
    }

    /// Returns the number of rounds started.
    #[must_use]
    pub const fn rounds_played(&self) -> u64 {
        self.rounds
    }

    /// Plays rounds until nobody is seated, then closes the table.
    ///
    /// Returns the number of rounds played. A closed table cannot be reopened;
    /// start a new table and dealer instead.
    ///
    /// # Errors
    ///
    /// Returns an error if a round fails. The table is closed and every
    /// player unseated.
    pub fn run(mut self) -> Result<u64, RoundError> {
        while self.next_round()?.is_some() {}
        Ok(self.rounds)
    }

    /// Plays a single round with the players seated now.
    ///
    /// # Errors
    ///
    /// Returns an error if the shoe runs out or a phase wait is interrupted
    /// under [`InterruptPolicy::Abort`]. Either way the table is closed and
    /// every player unseated. Returns [`RoundError::TableEmpty`] and closes
    /// the table if nobody is seated.
    pub fn play_round(&mut self) -> Result<RoundReport, RoundError> {
        self.next_round()?.ok_or(RoundError::TableEmpty)
    }

    fn next_round(&mut self) -> Result<Option<RoundReport>, RoundError> {
        let Some((seats, round)) = self.table.open_round() else {
            info!("table empty after {} rounds, dealer stopping", self.rounds);
            return Ok(None);
        };
        self.drive_round(seats, round).map(Some).inspect_err(|err| {
            error!("round {} failed: {err}", self.rounds);
            self.table.halt();
        })
    }

    fn drive_round(
        &mut self,
        seats: Vec<Arc<dyn Participant>>,
        round: Arc<RoundBarriers>,
    ) -> Result<RoundReport, RoundError> {
        let mut report = self.setup(&seats);

        let minimum_bet = self.table.minimum_bet();
        broadcast(&seats, &PhaseSignal::RoundBegins { minimum_bet });
        let bets = self.await_phase(&round.bets, Phase::Bet, &mut report)?;
        let sat_out = bets.forced().to_vec();
        report.bets = bets.arrived;
        if bets.reason == CloseReason::Interrupted {
            report.bets.extend(bets.missing.iter().map(|&player| (player, 0)));
        }

        let mut playing = Vec::with_capacity(seats.len());
        for seat in seats {
            if sat_out.contains(&seat.id()) {
                round.forfeit_after(seat.id(), Phase::Bet);
                seat.signal(PhaseSignal::SatOut);
            } else {
                seat.signal(PhaseSignal::BetsClosed);
                playing.push(seat);
            }
        }

        self.table.set_phase(RoundPhase::DealInitial);
        let dealer_up = self.deal_initial(&playing, &mut report)?;
        self.table.publish_dealer(&self.hand, self.has_blackjack);
        broadcast(&playing, &PhaseSignal::CardsDealt { dealer_up });

        let insurance = self.await_phase(&round.insurance, Phase::Insurance, &mut report)?;
        report.insured = insurance
            .arrived
            .iter()
            .filter(|(_, insured)| *insured)
            .map(|(player, _)| *player)
            .collect();
        let dealer_has_blackjack = self.has_blackjack;
        broadcast(
            &playing,
            &PhaseSignal::InsuranceResolved {
                dealer_has_blackjack,
            },
        );

        let ready = self.await_phase(&round.turn_ready, Phase::TurnReady, &mut report)?;

        self.table.set_phase(RoundPhase::PlayerTurns);
        for seat in &playing {
            if ready.missing.contains(&seat.id()) {
                debug!("{} not ready, stands on {}", seat.id(), seat.hand().value());
                continue;
            }
            let mut turn = Turn::new(&mut self.shoe, &mut report.dealt, seat.id(), dealer_up);
            seat.take_turn(&mut turn)?;
        }

        self.table.set_phase(RoundPhase::DealerTurn);
        self.dealer_turn(&mut report)?;
        self.table.publish_dealer(&self.hand, self.has_blackjack);
        broadcast(
            &playing,
            &PhaseSignal::DealerDone {
                dealer: self.hand.clone(),
            },
        );

        let continues = self.await_phase(&round.continues, Phase::Continue, &mut report)?;
        report.leaving = continues
            .arrived
            .iter()
            .filter(|(_, stay)| !*stay)
            .map(|(player, _)| *player)
            .chain(continues.forced().iter().copied())
            .collect();

        let removed = self.table.close_round(&report.leaving);
        report.dealer = self.hand.clone();
        report.dealer_has_blackjack = self.has_blackjack;
        info!(
            "round {} over: dealer {}, {} cards dealt, {} left the table",
            self.rounds,
            self.hand.value(),
            report.dealt.len(),
            removed.len()
        );
        Ok(report)
    }

    fn setup(&mut self, seats: &[Arc<dyn Participant>]) -> RoundReport {
        self.rounds += 1;
        self.table.set_phase(RoundPhase::Setup);

        let reshuffled = self.shoe.needs_reshuffle();
        if reshuffled {
            self.shoe.shuffle();
        }
        self.hand.clear();
        self.has_blackjack = false;

        let seated: Vec<PlayerId> = seats.iter().map(|seat| seat.id()).collect();
        info!(
            "round {}: {} players, {} cards in shoe{}",
            self.rounds,
            seated.len(),
            self.shoe.remaining_cards(),
            if reshuffled { " (reshuffled)" } else { "" }
        );

        RoundReport::new(self.rounds, reshuffled, seated)
    }

    fn await_phase<T: Clone>(
        &self,
        barrier: &PhaseBarrier<T>,
        phase: Phase,
        report: &mut RoundReport,
    ) -> Result<Closed<T>, RoundError> {
        self.table.set_phase(phase.awaited_in());
        debug!("round {}: awaiting {phase}", self.rounds);

        let closed = barrier.wait(self.table.options().phase_timeout);
        match closed.reason {
            CloseReason::Complete => {}
            CloseReason::TimedOut => {
                warn!(
                    "round {}: timed out awaiting {phase}, forcing defaults for {:?}",
                    self.rounds, closed.missing
                );
                report.forced.extend(
                    closed
                        .missing
                        .iter()
                        .map(|&player| ForcedDecision { player, phase }),
                );
            }
            CloseReason::Interrupted => match self.table.options().on_interrupt {
                InterruptPolicy::Proceed => {
                    warn!(
                        "round {}: wait for {phase} interrupted, proceeding without {:?}",
                        self.rounds, closed.missing
                    );
                    report.interrupted.push(phase);
                }
                InterruptPolicy::Abort => return Err(RoundError::Interrupted(phase)),
            },
        }
        Ok(closed)
    }

    /// Deals two cards each, dealer first, then every player in seat order.
    ///
    /// Returns the dealer's face-up card.
    fn deal_initial(
        &mut self,
        playing: &[Arc<dyn Participant>],
        report: &mut RoundReport,
    ) -> Result<Card, ShoeError> {
        for _ in 0..2 {
            let card = self.shoe.deal_card()?;
            trace!("dealer receives {card}");
            self.hand.add_card(card);
            report.dealt.push(Dealt {
                recipient: Recipient::Dealer,
                card,
            });

            for seat in playing {
                let card = self.shoe.deal_card()?;
                trace!("{} receives {card}", seat.id());
                seat.receive_card(card);
                report.dealt.push(Dealt {
                    recipient: Recipient::Player(seat.id()),
                    card,
                });
            }
        }

        self.has_blackjack = self.hand.value() == BLACKJACK;
        self.hand.get(0).ok_or(ShoeError::Empty)
    }

    fn dealer_turn(&mut self, report: &mut RoundReport) -> Result<(), ShoeError> {
        while must_draw(&self.hand) {
            let card = self.shoe.deal_card()?;
            trace!("dealer draws {card}");
            self.hand.add_card(card);
            report.dealt.push(Dealt {
                recipient: Recipient::Dealer,
                card,
            });
        }
        debug!("dealer stands on {}", self.hand.value());
        Ok(())
    }
}

fn broadcast(seats: &[Arc<dyn Participant>], signal: &PhaseSignal) {
    for seat in seats {
        seat.signal(signal.clone());
    }
}
