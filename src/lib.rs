//! A phase-synchronized blackjack table.
//!
//! One [`Dealer`] drives rounds for a [`Table`] of independently running
//! players. Every round walks the same phases (bets, initial deal,
//! insurance, player turns, dealer turn, round end) and the dealer does not
//! leave a phase until every player seated at the start of the round has
//! acknowledged it, or the configured timeout forces a default decision.
//!
//! The card, hand and shoe types build without `std` (enable `alloc`); the
//! table itself needs threads and is only available with the `std` feature.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bjtable::{Dealer, FlatBettor, PlayerActor, Table, TableOptions};
//!
//! let table = Arc::new(Table::new(TableOptions::default()));
//! let (_player, handle) = PlayerActor::spawn(&table, FlatBettor::new(3)).unwrap();
//! let rounds = Dealer::new(Arc::clone(&table), 42).run().unwrap();
//! assert_eq!(rounds, 3);
//! let _ = handle.join();
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod hand;
pub mod options;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod player;
pub mod shoe;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod strategy;
#[cfg(feature = "std")]
mod sync;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod table;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
#[cfg(feature = "std")]
pub use error::RoundError;
pub use error::{AckError, RosterError, ShoeError};
pub use hand::{BLACKJACK, Hand};
pub use options::{InterruptPolicy, RosterPolicy, TableOptions};
#[cfg(feature = "std")]
pub use player::{Participant, PhaseSignal, PlayerActor, PlayerId, PlayerSummary};
pub use shoe::Shoe;
#[cfg(feature = "std")]
pub use strategy::{FlatBettor, Strategy};
#[cfg(feature = "std")]
pub use table::{
    DEALER_STAND_VALUE, Dealer, Dealt, ForcedDecision, Phase, Recipient, RosterUpdate, RoundPhase,
    RoundReport, Table, Turn, must_draw,
};
