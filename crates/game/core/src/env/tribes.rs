//! Hostile tribe templates and oracle interface.
//!
//! A tribe is the static template a hostile is populated from at spawn and
//! again at every respawn: its stat block and the skills it rotates through.

use crate::state::{SkillId, StatBlock, TribeId};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TribeTemplate {
    pub id: TribeId,
    pub name: String,
    pub stats: StatBlock,
    /// Skills in rotation order.
    pub skills: Vec<SkillId>,
}

/// Oracle providing tribe templates by id.
pub trait TribeOracle: Send + Sync {
    fn tribe(&self, id: TribeId) -> Option<&TribeTemplate>;

    /// All tribe ids, in ascending order. Respawn picks among these.
    fn tribe_ids(&self) -> Vec<TribeId>;
}
