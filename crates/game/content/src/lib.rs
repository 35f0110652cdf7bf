//! Data-driven combat content and its loaders.
//!
//! This crate reads the static tables the encounter engine consults through
//! its oracles:
//! - Skill definitions (RON)
//! - Hostile tribe templates (RON)
//! - Engine tunables (TOML)
//!
//! Content is consumed by runtime oracles and never appears in encounter state.
//! All loaders deserialize encounter-core types directly through serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{Content, ConfigLoader, ContentFactory, SkillLoader, TribeLoader};
