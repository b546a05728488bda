use alloc::vec::Vec;
use core::time::Duration;
use std::sync::{Condvar, PoisonError};
use std::time::Instant;

use crate::error::AckError;
use crate::player::PlayerId;

pub struct Mutex<T>(std::sync::Mutex<T>);

impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Self(std::sync::Mutex::new(value))
    }

    pub fn lock(&self) -> std::sync::MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Why a barrier stopped waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Complete,
    TimedOut,
    Interrupted,
}

/// What a barrier had collected when it closed.
#[derive(Debug, Clone)]
pub struct Closed<T> {
    pub reason: CloseReason,
    pub arrived: Vec<(PlayerId, T)>,
    pub missing: Vec<PlayerId>,
}

impl<T> Closed<T> {
    /// Players owed a forced default: those still missing at the deadline.
    pub fn forced(&self) -> &[PlayerId] {
        if self.reason == CloseReason::TimedOut {
            &self.missing
        } else {
            &[]
        }
    }
}

struct BarrierState<T> {
    pending: Vec<PlayerId>,
    arrived: Vec<(PlayerId, T)>,
    forfeited: Vec<PlayerId>,
    closed: bool,
    interrupted: bool,
}

/// Single-use fan-in point for one phase of one round.
///
/// Sized to the players seated at round setup; each of them arrives at most
/// once with a payload, and anyone else is turned away.
pub struct PhaseBarrier<T> {
    state: Mutex<BarrierState<T>>,
    ready: Condvar,
}

impl<T: Clone> PhaseBarrier<T> {
    pub fn new(participants: &[PlayerId]) -> Self {
        Self {
            state: Mutex::new(BarrierState {
                pending: participants.to_vec(),
                arrived: Vec::with_capacity(participants.len()),
                forfeited: Vec::new(),
                closed: false,
                interrupted: false,
            }),
            ready: Condvar::new(),
        }
    }

    pub fn arrive(&self, player: PlayerId, payload: T) -> Result<(), AckError> {
        let mut state = self.state.lock();
        if state.arrived.iter().any(|(id, _)| *id == player) {
            return Err(AckError::Duplicate);
        }
        if state.forfeited.contains(&player) {
            return Err(AckError::Forfeited);
        }
        if state.closed {
            return Err(AckError::PhaseClosed);
        }
        let index = state
            .pending
            .iter()
            .position(|id| *id == player)
            .ok_or(AckError::NotInRound)?;

        state.pending.remove(index);
        state.arrived.push((player, payload));
        if state.pending.is_empty() {
            self.ready.notify_all();
        }
        Ok(())
    }

    /// Drops a player who will not take part in this phase.
    pub fn forfeit(&self, player: PlayerId) {
        let mut state = self.state.lock();
        if let Some(index) = state.pending.iter().position(|id| *id == player) {
            state.pending.remove(index);
            state.forfeited.push(player);
            if state.pending.is_empty() {
                self.ready.notify_all();
            }
        }
    }

    pub fn interrupt(&self) {
        self.state.lock().interrupted = true;
        self.ready.notify_all();
    }

    /// Blocks until every participant arrived, the timeout elapsed, or the
    /// wait was interrupted. The barrier is closed afterwards either way.
    pub fn wait(&self, timeout: Option<Duration>) -> Closed<T> {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        let mut state = self.state.lock();

        let reason = loop {
            if state.pending.is_empty() {
                break CloseReason::Complete;
            }
            if state.interrupted {
                break CloseReason::Interrupted;
            }
            match deadline {
                None => {
                    state = self
                        .ready
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break CloseReason::TimedOut;
                    }
                    state = self
                        .ready
                        .wait_timeout(state, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0;
                }
            }
        };

        state.closed = true;
        Closed {
            reason,
            arrived: state.arrived.clone(),
            missing: state.pending.clone(),
        }
    }
}
