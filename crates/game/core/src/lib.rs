//! Deterministic combat-encounter simulation.
//!
//! `encounter-core` decides what every hostile does each tick, tracks who is
//! fighting whom, merges battlefields as fights collide and resolves skill
//! damage. It performs no I/O: static data is read through the oracles in
//! [`env`] and notifications are queued in an [`notify::Outbox`]. All state
//! mutation flows through [`engine::Encounter`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod group;
pub mod hostile;
pub mod math;
pub mod notify;
pub mod state;

pub use combat::{AggroTracker, Damage, SkillResolver, Target};
pub use config::EncounterConfig;
pub use engine::Encounter;
pub use env::{
    Env, GameEnv, SkillDefinition, SkillOracle, SkillTable, TribeOracle, TribeTable, TribeTemplate,
};
pub use error::{EncounterError, ErrorKind, ErrorSeverity, GameError};
pub use group::{Battlefield, BattlefieldRegistry, Member, Party, PartyRegistry};
pub use hostile::{CombatPhase, HostileBrain, HostileState, PhaseKind, StateKind};
pub use math::{Transform, Vec3};
pub use notify::{Envelope, Notification, Outbox, Recipient};
pub use state::{
    BattlefieldId, Character, CharacterId, CharacterKind, CharacterRegistry, MapId, PartyId,
    Pools, SkillId, StatBlock, TribeId,
};
