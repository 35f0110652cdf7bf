//! Traits describing read-only static data.
//!
//! Oracles expose skill definitions and hostile tribe templates. The [`Env`]
//! aggregate bundles them so the engine can query everything it needs without
//! hard coupling to concrete implementations.
mod skills;
mod tables;
mod tribes;

pub use skills::{SkillDefinition, SkillOracle};
pub use tables::{SkillTable, TribeTable};
pub use tribes::{TribeOracle, TribeTemplate};

use crate::error::EncounterError;
use crate::state::{SkillId, TribeId};

/// Aggregates the read-only oracles required by the engine.
pub struct Env<'a, S, T>
where
    S: SkillOracle + ?Sized,
    T: TribeOracle + ?Sized,
{
    skills: &'a S,
    tribes: &'a T,
}

impl<S, T> Clone for Env<'_, S, T>
where
    S: SkillOracle + ?Sized,
    T: TribeOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Env<'_, S, T>
where
    S: SkillOracle + ?Sized,
    T: TribeOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn SkillOracle + 'a, dyn TribeOracle + 'a>;

impl<'a, S, T> Env<'a, S, T>
where
    S: SkillOracle + ?Sized,
    T: TribeOracle + ?Sized,
{
    pub fn new(skills: &'a S, tribes: &'a T) -> Self {
        Self { skills, tribes }
    }

    pub fn skills(&self) -> &'a S {
        self.skills
    }

    pub fn tribes(&self) -> &'a T {
        self.tribes
    }

    /// Looks up a skill definition.
    ///
    /// # Errors
    ///
    /// Returns `EncounterError::SkillNotFound` if the oracle has no such skill.
    pub fn skill(&self, id: SkillId) -> Result<&'a SkillDefinition, EncounterError> {
        self.skills.skill(id).ok_or(EncounterError::SkillNotFound(id))
    }

    /// Looks up a tribe template.
    ///
    /// # Errors
    ///
    /// Returns `EncounterError::TribeNotFound` if the oracle has no such tribe.
    pub fn tribe(&self, id: TribeId) -> Result<&'a TribeTemplate, EncounterError> {
        self.tribes.tribe(id).ok_or(EncounterError::TribeNotFound(id))
    }
}

impl<'a, S, T> Env<'a, S, T>
where
    S: SkillOracle + 'a,
    T: TribeOracle + 'a,
{
    /// Converts this environment into the trait-object based [`GameEnv`].
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let skills: &'a dyn SkillOracle = self.skills;
        let tribes: &'a dyn TribeOracle = self.tribes;
        Env::new(skills, tribes)
    }
}
