use crate::player::PlayerId;
use crate::sync::PhaseBarrier;

use super::Phase;

/// The four barriers of one round, all sized to the roster at setup.
pub(crate) struct RoundBarriers {
    pub(crate) bets: PhaseBarrier<usize>,
    pub(crate) insurance: PhaseBarrier<bool>,
    pub(crate) turn_ready: PhaseBarrier<()>,
    pub(crate) continues: PhaseBarrier<bool>,
}

impl RoundBarriers {
    pub(crate) fn new(participants: &[PlayerId]) -> Self {
        Self {
            bets: PhaseBarrier::new(participants),
            insurance: PhaseBarrier::new(participants),
            turn_ready: PhaseBarrier::new(participants),
            continues: PhaseBarrier::new(participants),
        }
    }

    pub(crate) fn interrupt(&self, phase: Phase) {
        match phase {
            Phase::Bet => self.bets.interrupt(),
            Phase::Insurance => self.insurance.interrupt(),
            Phase::TurnReady => self.turn_ready.interrupt(),
            Phase::Continue => self.continues.interrupt(),
        }
    }

    /// Drops `player` from every barrier after `phase`.
    pub(crate) fn forfeit_after(&self, player: PlayerId, phase: Phase) {
        if phase == Phase::Bet {
            self.insurance.forfeit(player);
        }
        if matches!(phase, Phase::Bet | Phase::Insurance) {
            self.turn_ready.forfeit(player);
        }
        if phase != Phase::Continue {
            self.continues.forfeit(player);
        }
    }
}
