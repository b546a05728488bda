//! Player decision logic.

use crate::card::Card;
use crate::error::ShoeError;
use crate::hand::Hand;
use crate::table::{Turn, must_draw};

/// How a player decides what to do in each phase.
///
/// Run by a [`PlayerActor`](crate::PlayerActor): every method except
/// [`take_turn`](Self::take_turn) runs on the player's own thread.
pub trait Strategy: Send {
    /// Called when a new round begins, before the bet.
    fn begin_round(&mut self) {}

    /// Returns the amount to bet this round.
    fn place_bet(&mut self, minimum_bet: usize) -> usize;

    /// Returns whether to take insurance.
    fn decide_insurance(&mut self, hand: &Hand, dealer_up: Card) -> bool;

    /// Runs before the player reports ready for its turn.
    fn prepare_turn(&mut self, _hand: &Hand) {}

    /// Plays the hand. Runs on the dealer's thread, one player at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the shoe runs out.
    fn take_turn(&mut self, hand: &mut Hand, turn: &mut Turn<'_>) -> Result<(), ShoeError>;

    /// Returns whether to stay for another round.
    fn decide_continue(&mut self, hand: &Hand, dealer: &Hand) -> bool;
}

/// Bets the table minimum, never insures, draws like the dealer, and leaves
/// after a fixed number of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatBettor {
    rounds_left: u32,
}

impl FlatBettor {
    /// Creates a bettor that plays `rounds` rounds.
    #[must_use]
    pub const fn new(rounds: u32) -> Self {
        Self {
            rounds_left: rounds,
        }
    }
}

impl Strategy for FlatBettor {
    fn place_bet(&mut self, minimum_bet: usize) -> usize {
        minimum_bet
    }

    fn decide_insurance(&mut self, _hand: &Hand, _dealer_up: Card) -> bool {
        false
    }

    fn take_turn(&mut self, hand: &mut Hand, turn: &mut Turn<'_>) -> Result<(), ShoeError> {
        while must_draw(hand) {
            hand.add_card(turn.deal_card()?);
        }
        Ok(())
    }

    fn decide_continue(&mut self, _hand: &Hand, _dealer: &Hand) -> bool {
        self.rounds_left = self.rounds_left.saturating_sub(1);
        self.rounds_left > 0
    }
}
