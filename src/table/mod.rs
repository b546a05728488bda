//! Shared table state and the dealer that drives rounds.
//!
//! The [`Table`] is shared between the dealer and every player: it holds the
//! roster, the current round's phase barriers, and a read-only copy of the
//! dealer's hand. The [`Dealer`] owns the shoe and the dealer's hand and is
//! the only thing that moves a round forward.

use core::sync::atomic::{AtomicU32, Ordering};

use alloc::sync::Arc;
use alloc::vec::Vec;

use log::debug;

use crate::card::Card;
use crate::error::{AckError, RosterError};
use crate::hand::Hand;
use crate::options::{RosterPolicy, TableOptions};
use crate::player::{Participant, PhaseSignal, PlayerId};
use crate::sync::Mutex;

mod dealer;
mod report;
mod round;
pub mod state;
mod turn;

pub use dealer::{DEALER_STAND_VALUE, Dealer, must_draw};
pub use report::{Dealt, ForcedDecision, Recipient, RoundReport};
pub use state::{Phase, RoundPhase};
pub use turn::Turn;

use round::RoundBarriers;

/// Outcome of a successful roster change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterUpdate {
    /// The change took effect immediately.
    Applied,
    /// A round is in progress; the change takes effect when it closes.
    Deferred,
}

enum PendingChange {
    Join(Arc<dyn Participant>),
    Leave(PlayerId),
}

#[derive(Default)]
struct Roster {
    seats: Vec<Arc<dyn Participant>>,
    pending: Vec<PendingChange>,
    round_open: bool,
    halted: bool,
}

impl Roster {
    fn is_seated(&self, player: PlayerId) -> bool {
        self.seats.iter().any(|seat| seat.id() == player)
    }

    fn is_joining(&self, player: PlayerId) -> bool {
        self.pending
            .iter()
            .any(|change| matches!(change, PendingChange::Join(seat) if seat.id() == player))
    }

    fn is_leaving(&self, player: PlayerId) -> bool {
        self.pending
            .iter()
            .any(|change| matches!(change, PendingChange::Leave(id) if *id == player))
    }

    fn take_join(&mut self, player: PlayerId) -> Option<Arc<dyn Participant>> {
        let index = self
            .pending
            .iter()
            .position(|change| matches!(change, PendingChange::Join(seat) if seat.id() == player))?;
        match self.pending.remove(index) {
            PendingChange::Join(seat) => Some(seat),
            PendingChange::Leave(_) => None,
        }
    }

    fn unseat(&mut self, player: PlayerId) -> Option<Arc<dyn Participant>> {
        let index = self.seats.iter().position(|seat| seat.id() == player)?;
        Some(self.seats.remove(index))
    }
}

#[derive(Debug, Default)]
struct DealerView {
    hand: Hand,
    has_blackjack: bool,
}

/// A blackjack table shared by its dealer and players.
///
/// Players join and leave through [`add_player`](Self::add_player) and
/// [`remove_player`](Self::remove_player), and report each phase through the
/// four acknowledgment methods. A [`Dealer`] bound to the table runs the
/// rounds.
pub struct Table {
    /// Table options.
    options: TableOptions,
    /// Seated players and queued changes.
    roster: Mutex<Roster>,
    /// Barriers for the round in progress.
    round: Mutex<Option<Arc<RoundBarriers>>>,
    /// Current position in the round.
    phase: Mutex<RoundPhase>,
    /// Copy of the dealer's hand published after the deal and dealer turn.
    dealer_view: Mutex<DealerView>,
    /// Next player ID to assign.
    next_id: AtomicU32,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(options: TableOptions) -> Self {
        Self {
            options,
            roster: Mutex::new(Roster::default()),
            round: Mutex::new(None),
            phase: Mutex::new(RoundPhase::Idle),
            dealer_view: Mutex::new(DealerView::default()),
            next_id: AtomicU32::new(0),
        }
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Allocates a fresh player ID.
    #[must_use]
    pub fn next_player_id(&self) -> PlayerId {
        PlayerId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Seats a player.
    ///
    /// Between rounds the player is seated immediately. During a round the
    /// seat is queued for the next round, or refused under
    /// [`RosterPolicy::Reject`].
    ///
    /// # Errors
    ///
    /// Returns an error if the player is already seated, the round rejects
    /// roster changes, or the table is closed.
    pub fn add_player(&self, player: Arc<dyn Participant>) -> Result<RosterUpdate, RosterError> {
        let id = player.id();
        let mut roster = self.roster.lock();
        if roster.halted {
            return Err(RosterError::Closed);
        }
        if roster.is_seated(id) || roster.is_joining(id) {
            return Err(RosterError::AlreadySeated);
        }

        if !roster.round_open {
            roster.seats.push(player);
            debug!("{id} seated");
            return Ok(RosterUpdate::Applied);
        }

        match self.options.roster_policy {
            RosterPolicy::Defer => {
                roster.pending.push(PendingChange::Join(player));
                debug!("{id} will be seated next round");
                Ok(RosterUpdate::Deferred)
            }
            RosterPolicy::Reject => Err(RosterError::RoundInProgress),
        }
    }

    /// Removes a player.
    ///
    /// Between rounds the player leaves immediately. During a round the
    /// player keeps the seat until the round closes, or the removal is
    /// refused under [`RosterPolicy::Reject`]. A removed player is sent
    /// [`PhaseSignal::Unseated`].
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not seated, the round rejects
    /// roster changes, or the table is closed.
    pub fn remove_player(&self, player: PlayerId) -> Result<RosterUpdate, RosterError> {
        let mut roster = self.roster.lock();
        if roster.halted {
            return Err(RosterError::Closed);
        }

        if let Some(seat) = roster.take_join(player) {
            drop(roster);
            seat.signal(PhaseSignal::Unseated);
            return Ok(RosterUpdate::Applied);
        }
        if !roster.is_seated(player) {
            return Err(RosterError::NotSeated);
        }

        if !roster.round_open {
            let seat = roster.unseat(player);
            drop(roster);
            if let Some(seat) = seat {
                seat.signal(PhaseSignal::Unseated);
            }
            debug!("{player} left the table");
            return Ok(RosterUpdate::Applied);
        }

        match self.options.roster_policy {
            RosterPolicy::Defer => {
                if !roster.is_leaving(player) {
                    roster.pending.push(PendingChange::Leave(player));
                }
                debug!("{player} will leave when the round closes");
                Ok(RosterUpdate::Deferred)
            }
            RosterPolicy::Reject => Err(RosterError::RoundInProgress),
        }
    }

    /// Returns the number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.roster.lock().seats.len()
    }

    /// Returns the IDs of the seated players, in seat order.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerId> {
        self.roster.lock().seats.iter().map(|seat| seat.id()).collect()
    }

    /// Returns the table minimum bet.
    #[must_use]
    pub const fn minimum_bet(&self) -> usize {
        self.options.minimum_bet
    }

    /// Returns whether the dealer's first two cards made 21.
    ///
    /// Meaningful from the end of the initial deal.
    #[must_use]
    pub fn dealer_has_blackjack(&self) -> bool {
        self.dealer_view.lock().has_blackjack
    }

    /// Returns the dealer's first card, once dealt.
    #[must_use]
    pub fn dealer_shown_card(&self) -> Option<Card> {
        self.dealer_view.lock().hand.get(0)
    }

    /// Returns a copy of the dealer's hand as of the last deal.
    #[must_use]
    pub fn dealer_hand(&self) -> Hand {
        self.dealer_view.lock().hand.clone()
    }

    /// Returns the current position in the round.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        *self.phase.lock()
    }

    /// Returns whether the dealer has stopped for good.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.roster.lock().halted
    }

    /// Acknowledges that `player` placed a bet of `amount`.
    ///
    /// # Errors
    ///
    /// Returns an error if no round is in progress, the player is not in it,
    /// already acknowledged, or the phase closed.
    pub fn placed_bet(&self, player: PlayerId, amount: usize) -> Result<(), AckError> {
        self.current_round()?
            .bets
            .arrive(player, amount)
            .inspect(|()| debug!("{player} bet {amount}"))
    }

    /// Acknowledges that `player` decided on insurance.
    ///
    /// # Errors
    ///
    /// Returns an error if no round is in progress, the player is not in it,
    /// already acknowledged, or the phase closed.
    pub fn insurance_decided(&self, player: PlayerId, insured: bool) -> Result<(), AckError> {
        self.current_round()?
            .insurance
            .arrive(player, insured)
            .inspect(|()| debug!("{player} insurance: {insured}"))
    }

    /// Acknowledges that `player` is ready for its turn.
    ///
    /// # Errors
    ///
    /// Returns an error if no round is in progress, the player is not in it,
    /// already acknowledged, or the phase closed.
    pub fn turn_ready(&self, player: PlayerId) -> Result<(), AckError> {
        self.current_round()?
            .turn_ready
            .arrive(player, ())
            .inspect(|()| debug!("{player} ready for turn"))
    }

    /// Acknowledges that `player` decided whether to `stay` for another round.
    ///
    /// A player who does not stay leaves the table when the round closes.
    ///
    /// # Errors
    ///
    /// Returns an error if no round is in progress, the player is not in it,
    /// already acknowledged, or the phase closed.
    pub fn continue_decided(&self, player: PlayerId, stay: bool) -> Result<(), AckError> {
        self.current_round()?
            .continues
            .arrive(player, stay)
            .inspect(|()| debug!("{player} stays: {stay}"))
    }

    /// Interrupts the dealer's current phase wait.
    ///
    /// What happens next depends on the table's
    /// [`InterruptPolicy`](crate::InterruptPolicy). Returns `false` if the
    /// dealer is not waiting on a phase.
    pub fn interrupt(&self) -> bool {
        let Some(phase) = self.phase().awaiting() else {
            return false;
        };
        let Ok(round) = self.current_round() else {
            return false;
        };
        round.interrupt(phase);
        true
    }

    fn current_round(&self) -> Result<Arc<RoundBarriers>, AckError> {
        self.round
            .lock()
            .clone()
            .ok_or(AckError::NoRoundInProgress)
    }

    pub(crate) fn set_phase(&self, phase: RoundPhase) {
        *self.phase.lock() = phase;
    }

    pub(crate) fn publish_dealer(&self, hand: &Hand, has_blackjack: bool) {
        let mut view = self.dealer_view.lock();
        view.hand.clone_from(hand);
        view.has_blackjack = has_blackjack;
    }

    /// Snapshots the roster and opens the round's barriers.
    ///
    /// Closes the table instead and returns `None` if nobody is seated.
    pub(crate) fn open_round(&self) -> Option<(Vec<Arc<dyn Participant>>, Arc<RoundBarriers>)> {
        let mut roster = self.roster.lock();
        if roster.seats.is_empty() {
            roster.halted = true;
            drop(roster);
            self.set_phase(RoundPhase::Halted);
            return None;
        }
        roster.round_open = true;
        let seats = roster.seats.clone();
        let ids: Vec<PlayerId> = seats.iter().map(|seat| seat.id()).collect();
        let barriers = Arc::new(RoundBarriers::new(&ids));
        *self.round.lock() = Some(Arc::clone(&barriers));
        drop(roster);

        *self.dealer_view.lock() = DealerView::default();
        Some((seats, barriers))
    }

    /// Closes the round and applies queued roster changes plus `leaving`.
    ///
    /// Returns the players who lost their seat.
    pub(crate) fn close_round(&self, leaving: &[PlayerId]) -> Vec<PlayerId> {
        let mut roster = self.roster.lock();
        *self.round.lock() = None;
        roster.round_open = false;

        let mut removed = Vec::new();
        for change in core::mem::take(&mut roster.pending) {
            match change {
                PendingChange::Join(seat) => {
                    debug!("{} seated", seat.id());
                    roster.seats.push(seat);
                }
                PendingChange::Leave(player) => removed.extend(roster.unseat(player)),
            }
        }
        for &player in leaving {
            removed.extend(roster.unseat(player));
        }
        drop(roster);

        self.set_phase(RoundPhase::Idle);
        removed
            .into_iter()
            .map(|seat| {
                seat.signal(PhaseSignal::Unseated);
                seat.id()
            })
            .collect()
    }

    /// Closes the table and unseats everyone.
    pub(crate) fn halt(&self) {
        let mut roster = self.roster.lock();
        *self.round.lock() = None;
        roster.halted = true;
        roster.round_open = false;
        let mut seats = core::mem::take(&mut roster.seats);
        for change in core::mem::take(&mut roster.pending) {
            if let PendingChange::Join(seat) = change {
                seats.push(seat);
            }
        }
        drop(roster);

        self.set_phase(RoundPhase::Halted);
        for seat in seats {
            seat.signal(PhaseSignal::Unseated);
        }
    }
}
