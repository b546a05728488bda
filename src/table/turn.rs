use alloc::vec::Vec;

use log::trace;

use crate::card::Card;
use crate::error::ShoeError;
use crate::player::PlayerId;
use crate::shoe::Shoe;

use super::{Dealt, Recipient};

/// Access to the shoe for the player whose turn it is.
///
/// A `Turn` only exists while the dealer is playing that one player's hand,
/// so no other player can draw at the same time.
pub struct Turn<'a> {
    shoe: &'a mut Shoe,
    dealt: &'a mut Vec<Dealt>,
    player: PlayerId,
    dealer_up: Card,
}

impl<'a> Turn<'a> {
    pub(crate) const fn new(
        shoe: &'a mut Shoe,
        dealt: &'a mut Vec<Dealt>,
        player: PlayerId,
        dealer_up: Card,
    ) -> Self {
        Self {
            shoe,
            dealt,
            player,
            dealer_up,
        }
    }

    /// Draws a card from the shoe for this player.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if the shoe is out of cards.
    pub fn deal_card(&mut self) -> Result<Card, ShoeError> {
        let card = self.shoe.deal_card()?;
        trace!("{} draws {card}", self.player);
        self.dealt.push(Dealt {
            recipient: Recipient::Player(self.player),
            card,
        });
        Ok(card)
    }

    /// The player whose turn it is.
    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    /// The dealer's face-up card.
    #[must_use]
    pub const fn dealer_up(&self) -> Card {
        self.dealer_up
    }

    /// Cards left in the shoe.
    #[must_use]
    pub fn remaining_cards(&self) -> usize {
        self.shoe.remaining_cards()
    }
}
