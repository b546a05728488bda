//! The shoe: a depleting, shuffled source of cards from several decks.

extern crate alloc;

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE};
use crate::error::ShoeError;

/// A shoe of `decks` standard decks.
///
/// The top of the shoe is the end of the backing vector, so dealing is a pop.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    decks: u8,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates a freshly shuffled shoe.
    #[must_use]
    pub fn new(decks: u8, seed: u64) -> Self {
        let mut shoe = Self {
            cards: Vec::with_capacity(decks as usize * DECK_SIZE),
            decks,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        shoe.shuffle();
        shoe
    }

    /// Creates a full shuffled shoe whose first deals are `top`, in order.
    ///
    /// Each card in `top` is taken out of the shuffled shoe before being
    /// placed on top, so the shoe still holds `decks * 52` cards as long as
    /// `top` does not ask for more copies of a card than the shoe contains.
    /// Cards beyond those copies are added on top anyway.
    #[must_use]
    pub fn with_top_cards(decks: u8, seed: u64, top: &[Card]) -> Self {
        let mut shoe = Self::new(decks, seed);
        for card in top {
            if let Some(position) = shoe.cards.iter().position(|c| c == card) {
                shoe.cards.remove(position);
            }
        }
        shoe.cards.extend(top.iter().rev().copied());
        shoe
    }

    /// Refills the shoe with every card of every deck and shuffles it.
    pub fn shuffle(&mut self) {
        self.cards.clear();
        for _ in 0..self.decks {
            self.cards.extend(Card::deck());
        }
        self.cards.shuffle(&mut self.rng);
    }

    /// Deals the top card.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if no cards remain.
    pub fn deal_card(&mut self) -> Result<Card, ShoeError> {
        self.cards.pop().ok_or(ShoeError::Empty)
    }

    /// Returns the number of cards left to deal.
    #[must_use]
    pub fn remaining_cards(&self) -> usize {
        self.cards.len()
    }

    /// Returns the number of decks in the shoe.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Returns the number of cards in a full shoe.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.decks as usize * DECK_SIZE
    }

    /// Returns the remaining-card count below which the shoe is replaced.
    ///
    /// A quarter of a full shoe: 78 cards for six decks.
    #[must_use]
    pub const fn reshuffle_threshold(&self) -> usize {
        self.capacity() / 4
    }

    /// Returns whether the shoe should be reshuffled before the next round.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.remaining_cards() < self.reshuffle_threshold()
    }
}
