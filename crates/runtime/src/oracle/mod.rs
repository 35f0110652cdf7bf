//! Runtime wrappers around static combat content.
//!
//! These implementations expose the encounter-core oracle traits and bundle
//! them into an [`OracleManager`] so the worker can build
//! [`encounter_core::GameEnv`] views on demand. The data is immutable at
//! runtime; dynamic state lives in the [`encounter_core::Encounter`].
mod skills;
mod tribes;

use std::sync::Arc;

use encounter_content::Content;
use encounter_core::{Env, GameEnv};

pub use skills::SkillOracleImpl;
pub use tribes::TribeOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) skills: Arc<SkillOracleImpl>,
    pub(crate) tribes: Arc<TribeOracleImpl>,
}

impl OracleManager {
    pub fn new(skills: Arc<SkillOracleImpl>, tribes: Arc<TribeOracleImpl>) -> Self {
        Self { skills, tribes }
    }

    /// Wraps tables loaded by [`encounter_content::ContentFactory`].
    pub fn from_content(content: &Content) -> Self {
        Self::new(
            Arc::new(SkillOracleImpl::from_table(content.skills.clone())),
            Arc::new(TribeOracleImpl::from_table(content.tribes.clone())),
        )
    }

    /// Converts oracle manager into GameEnv for encounter-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::new(self.skills.as_ref(), self.tribes.as_ref()).as_game_env()
    }

    pub fn skills(&self) -> &SkillOracleImpl {
        &self.skills
    }

    pub fn tribes(&self) -> &TribeOracleImpl {
        &self.tribes
    }
}
