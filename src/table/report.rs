//! Round report types.

use alloc::vec::Vec;

use crate::card::Card;
use crate::hand::Hand;
use crate::player::PlayerId;

use super::Phase;

/// Who received a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// The dealer.
    Dealer,
    /// A player.
    Player(PlayerId),
}

/// One card leaving the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dealt {
    /// Who received the card.
    pub recipient: Recipient,
    /// The card.
    pub card: Card,
}

/// A decision the dealer made for a player who missed a phase deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedDecision {
    /// The player.
    pub player: PlayerId,
    /// The phase the player missed.
    pub phase: Phase,
}

/// What happened during one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Round number, starting at 1.
    pub round: u64,
    /// Whether the shoe was reshuffled at setup.
    pub reshuffled: bool,
    /// Players seated at setup, in seat order.
    pub seated: Vec<PlayerId>,
    /// Every card dealt, in order.
    pub dealt: Vec<Dealt>,
    /// Bets in arrival order.
    pub bets: Vec<(PlayerId, usize)>,
    /// Players who took insurance.
    pub insured: Vec<PlayerId>,
    /// The dealer's final hand.
    pub dealer: Hand,
    /// Whether the dealer's first two cards made 21.
    pub dealer_has_blackjack: bool,
    /// Defaults applied to players who missed a deadline.
    pub forced: Vec<ForcedDecision>,
    /// Phases whose wait was interrupted and skipped.
    pub interrupted: Vec<Phase>,
    /// Players who left the table when the round closed.
    pub leaving: Vec<PlayerId>,
}

impl RoundReport {
    pub(crate) const fn new(round: u64, reshuffled: bool, seated: Vec<PlayerId>) -> Self {
        Self {
            round,
            reshuffled,
            seated,
            dealt: Vec::new(),
            bets: Vec::new(),
            insured: Vec::new(),
            dealer: Hand::new(),
            dealer_has_blackjack: false,
            forced: Vec::new(),
            interrupted: Vec::new(),
            leaving: Vec::new(),
        }
    }

    /// Returns the cards dealt to `recipient`, in order.
    #[must_use]
    pub fn cards_for(&self, recipient: Recipient) -> Vec<Card> {
        self.dealt
            .iter()
            .filter(|dealt| dealt.recipient == recipient)
            .map(|dealt| dealt.card)
            .collect()
    }

    /// Returns whether `player` was forced a default for `phase`.
    #[must_use]
    pub fn was_forced(&self, player: PlayerId, phase: Phase) -> bool {
        self.forced.contains(&ForcedDecision { player, phase })
    }
}
