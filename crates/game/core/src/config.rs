/// Tunable parameters of the combat simulation.
///
/// Durations are milliseconds of accumulated tick time, never wall-clock.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterConfig {
    /// Hate removed from every aggro record per second.
    pub aggro_decay_per_second: f32,
    /// Aggro records drop once their character is farther than this from the hostile.
    pub leash_radius: f32,
    /// Time a dead hostile waits before respawning.
    pub respawn_interval_ms: u64,
    /// Penalty wait after a skill standby is interrupted.
    pub interruption_penalty_ms: u64,
    /// Radius around the spawn point used for Normal-state wandering.
    pub wander_radius: f32,
    /// Idle time between two wander walks.
    pub wander_idle_ms: u64,
    /// Distance at which a wander destination counts as reached.
    pub arrival_tolerance: f32,
    /// Seed of the engine's random stream (wander points, respawn tribes).
    pub rng_seed: u64,
}

impl EncounterConfig {
    pub const DEFAULT_AGGRO_DECAY_PER_SECOND: f32 = 1.0;
    pub const DEFAULT_LEASH_RADIUS: f32 = 40.0;
    pub const DEFAULT_RESPAWN_INTERVAL_MS: u64 = 10_000;
    pub const DEFAULT_INTERRUPTION_PENALTY_MS: u64 = 1_000;
    pub const DEFAULT_WANDER_RADIUS: f32 = 5.0;
    pub const DEFAULT_WANDER_IDLE_MS: u64 = 3_000;
    pub const DEFAULT_ARRIVAL_TOLERANCE: f32 = 0.5;

    pub fn new() -> Self {
        Self {
            aggro_decay_per_second: Self::DEFAULT_AGGRO_DECAY_PER_SECOND,
            leash_radius: Self::DEFAULT_LEASH_RADIUS,
            respawn_interval_ms: Self::DEFAULT_RESPAWN_INTERVAL_MS,
            interruption_penalty_ms: Self::DEFAULT_INTERRUPTION_PENALTY_MS,
            wander_radius: Self::DEFAULT_WANDER_RADIUS,
            wander_idle_ms: Self::DEFAULT_WANDER_IDLE_MS,
            arrival_tolerance: Self::DEFAULT_ARRIVAL_TOLERANCE,
            rng_seed: 0,
        }
    }

    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new()
    }
}
