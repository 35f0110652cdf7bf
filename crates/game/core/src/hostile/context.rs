use rand_chacha::ChaCha8Rng;

use crate::config::EncounterConfig;
use crate::env::GameEnv;
use crate::error::EncounterError;
use crate::state::{Character, CharacterId, CharacterRegistry, SkillId};

/// Effects a hostile brain asks the orchestrator to carry out.
///
/// Brains only touch their own character record and aggro; grouping,
/// notifications and skill resolution against other characters happen in
/// the engine once the brain returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrainSignal {
    EnteredBattle,
    /// Battle state exited; the hostile must leave its battlefield.
    LeftBattle,
    Died,
    Respawned,
    SkillAnnounced {
        skill: SkillId,
        target: Option<CharacterId>,
    },
    /// Cast time elapsed; resolve `skill` against `target`.
    CastSkill { skill: SkillId, target: CharacterId },
}

/// Owner handle passed to both state machines for one operation.
pub struct BrainContext<'a> {
    pub owner: CharacterId,
    pub characters: &'a mut CharacterRegistry,
    pub env: GameEnv<'a>,
    pub config: &'a EncounterConfig,
    pub rng: &'a mut ChaCha8Rng,
    pub elapsed_ms: u64,
    pub signals: &'a mut Vec<BrainSignal>,
}

impl BrainContext<'_> {
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_ms as f32 / 1000.0
    }

    pub fn me(&self) -> Result<&Character, EncounterError> {
        self.characters
            .get(self.owner)
            .ok_or(EncounterError::CharacterNotFound(self.owner))
    }

    pub fn me_mut(&mut self) -> Result<&mut Character, EncounterError> {
        self.characters
            .get_mut(self.owner)
            .ok_or(EncounterError::CharacterNotFound(self.owner))
    }

    pub fn emit(&mut self, signal: BrainSignal) {
        self.signals.push(signal);
    }
}

/// Tick-accumulated countdown in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining_ms: u64,
}

impl Countdown {
    pub const fn new(remaining_ms: u64) -> Self {
        Self { remaining_ms }
    }

    /// Subtracts one tick and reports whether the countdown reached zero.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }

    pub const fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }
}
