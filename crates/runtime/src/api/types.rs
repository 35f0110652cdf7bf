use serde::{Deserialize, Serialize};

use encounter_core::{HostileBrain, PhaseKind, StateKind, Target};

/// Read-only view of one hostile's brain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostileStatus {
    pub state: StateKind,
    /// Present only while in battle.
    pub phase: Option<PhaseKind>,
    /// Aggro records, highest hate first as of the last tick.
    pub aggro: Vec<Target>,
}

impl From<&HostileBrain> for HostileStatus {
    fn from(brain: &HostileBrain) -> Self {
        Self {
            state: brain.kind(),
            phase: brain.phase(),
            aggro: brain
                .aggro()
                .map(|tracker| tracker.iter().copied().collect())
                .unwrap_or_default(),
        }
    }
}
