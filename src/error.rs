//! Error types for table operations.

use thiserror::Error;

#[cfg(feature = "std")]
use crate::table::Phase;

/// Errors raised by the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// A card was requested from an empty shoe.
    ///
    /// The round setup reshuffle keeps this unreachable; seeing it means that
    /// invariant was broken.
    #[error("no cards left in the shoe")]
    Empty,
}

/// Errors that can occur when joining or leaving the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Player is already seated or waiting to be seated.
    #[error("player is already seated")]
    AlreadySeated,
    /// Player is not seated at the table.
    #[error("player is not seated")]
    NotSeated,
    /// A round is in progress and the table rejects mid-round changes.
    #[error("a round is in progress")]
    RoundInProgress,
    /// The dealer has stopped running rounds.
    #[error("the table is closed")]
    Closed,
}

/// Errors that can occur when a player acknowledges a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AckError {
    /// No round is in progress.
    #[error("no round is in progress")]
    NoRoundInProgress,
    /// Player was not seated when the round started.
    #[error("player is not part of this round")]
    NotInRound,
    /// Player already acknowledged this phase.
    #[error("phase already acknowledged")]
    Duplicate,
    /// Player was dropped from the round after missing an earlier phase.
    #[error("player forfeited this round")]
    Forfeited,
    /// The dealer stopped waiting for this phase.
    #[error("phase is closed")]
    PhaseClosed,
}

/// Errors that end a round.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The shoe ran dry mid-round.
    #[error("shoe exhausted mid-round")]
    EmptyShoe,
    /// A phase wait was interrupted and the table aborts on interruption.
    #[error("wait for {0} was interrupted")]
    Interrupted(Phase),
    /// Nobody was seated when the round was due to start; the table closed.
    #[error("no players are seated")]
    TableEmpty,
}

#[cfg(feature = "std")]
impl From<ShoeError> for RoundError {
    fn from(err: ShoeError) -> Self {
        match err {
            ShoeError::Empty => Self::EmptyShoe,
        }
    }
}
