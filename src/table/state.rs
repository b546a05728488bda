//! Round state types.

use core::fmt;

/// Where the dealer is within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Between rounds.
    Idle,
    /// Reshuffling if needed and snapshotting the roster.
    Setup,
    /// Waiting for every bet.
    AwaitBets,
    /// Dealing two cards to the dealer and each player.
    DealInitial,
    /// Waiting for every insurance decision.
    AwaitInsurance,
    /// Waiting for every player to be ready for its turn.
    AwaitTurnReady,
    /// Playing each player's turn in seat order.
    PlayerTurns,
    /// Dealer draws to 17.
    DealerTurn,
    /// Waiting for every player to decide whether to stay.
    AwaitRoundEnd,
    /// The dealer stopped; no further rounds will run.
    Halted,
}

impl RoundPhase {
    /// Returns the acknowledgment the dealer is waiting on, if any.
    #[must_use]
    pub const fn awaiting(self) -> Option<Phase> {
        match self {
            Self::AwaitBets => Some(Phase::Bet),
            Self::AwaitInsurance => Some(Phase::Insurance),
            Self::AwaitTurnReady => Some(Phase::TurnReady),
            Self::AwaitRoundEnd => Some(Phase::Continue),
            _ => None,
        }
    }
}

/// A phase every player acknowledges once per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Bet placed.
    Bet,
    /// Insurance decided.
    Insurance,
    /// Ready for the turn.
    TurnReady,
    /// Stay-or-leave decided.
    Continue,
}

impl Phase {
    /// The round state in which the dealer waits for this phase.
    #[must_use]
    pub const fn awaited_in(self) -> RoundPhase {
        match self {
            Self::Bet => RoundPhase::AwaitBets,
            Self::Insurance => RoundPhase::AwaitInsurance,
            Self::TurnReady => RoundPhase::AwaitTurnReady,
            Self::Continue => RoundPhase::AwaitRoundEnd,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bet => "bets",
            Self::Insurance => "insurance decisions",
            Self::TurnReady => "turn readiness",
            Self::Continue => "continue decisions",
        })
    }
}
