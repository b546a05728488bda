//! Table configuration options.

use core::time::Duration;

/// What the dealer does when a phase wait is interrupted before every
/// player has acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum InterruptPolicy {
    /// Log the interruption and carry on as if the phase completed.
    ///
    /// Players who had not acknowledged keep their seat in the round, so the
    /// phase may close without full participation.
    #[default]
    Proceed,
    /// Fail the round and halt the dealer.
    Abort,
}

/// How roster changes are handled while a round is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum RosterPolicy {
    /// Queue the change and apply it when the round closes.
    #[default]
    Defer,
    /// Refuse the change.
    Reject,
}

/// Configuration options for a table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use core::time::Duration;
/// use bjtable::TableOptions;
///
/// let options = TableOptions::default()
///     .with_decks(8)
///     .with_minimum_bet(25)
///     .with_phase_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Smallest bet accepted at the table.
    pub minimum_bet: usize,
    /// How long the dealer waits for each phase. `None` waits forever.
    pub phase_timeout: Option<Duration>,
    /// What happens when a phase wait is interrupted.
    pub on_interrupt: InterruptPolicy,
    /// How mid-round joins and leaves are handled.
    pub roster_policy: RosterPolicy,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            minimum_bet: 500,
            phase_timeout: None,
            on_interrupt: InterruptPolicy::Proceed,
            roster_policy: RosterPolicy::Defer,
        }
    }
}

impl TableOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the minimum bet.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_minimum_bet(10);
    /// assert_eq!(options.minimum_bet, 10);
    /// ```
    #[must_use]
    pub const fn with_minimum_bet(mut self, minimum_bet: usize) -> Self {
        self.minimum_bet = minimum_bet;
        self
    }

    /// Sets how long the dealer waits for each phase.
    ///
    /// Players still missing when the timeout elapses get a forced default
    /// decision for that phase.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_phase_timeout(Duration::from_millis(250));
    /// assert_eq!(options.phase_timeout, Some(Duration::from_millis(250)));
    /// ```
    #[must_use]
    pub const fn with_phase_timeout(mut self, timeout: Duration) -> Self {
        self.phase_timeout = Some(timeout);
        self
    }

    /// Sets the interrupted-wait policy.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{InterruptPolicy, TableOptions};
    ///
    /// let options = TableOptions::default().with_on_interrupt(InterruptPolicy::Abort);
    /// assert_eq!(options.on_interrupt, InterruptPolicy::Abort);
    /// ```
    #[must_use]
    pub const fn with_on_interrupt(mut self, policy: InterruptPolicy) -> Self {
        self.on_interrupt = policy;
        self
    }

    /// Sets the mid-round roster policy.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{RosterPolicy, TableOptions};
    ///
    /// let options = TableOptions::default().with_roster_policy(RosterPolicy::Reject);
    /// assert_eq!(options.roster_policy, RosterPolicy::Reject);
    /// ```
    #[must_use]
    pub const fn with_roster_policy(mut self, policy: RosterPolicy) -> Self {
        self.roster_policy = policy;
        self
    }
}
