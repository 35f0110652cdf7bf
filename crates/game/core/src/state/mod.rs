//! Authoritative character state.
//!
//! This module owns the identifiers, character records and the registry that
//! holds them. Grouping (parties, battlefields) and hostile behavior refer to
//! characters by id only and resolve them through [`CharacterRegistry`].
mod character;
mod ids;
mod registry;

pub use character::{Character, CharacterKind, Pools, StatBlock};
pub use ids::{BattlefieldId, CharacterId, IdAllocator, MapId, PartyId, SkillId, TribeId};
pub use registry::CharacterRegistry;
