//! In-memory oracle implementations backed by ordered maps.
//!
//! Content loaders produce these tables; the runtime shares them behind `Arc`.

use std::collections::BTreeMap;

use super::{SkillDefinition, SkillOracle, TribeOracle, TribeTemplate};
use crate::state::{SkillId, TribeId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillTable {
    skills: BTreeMap<SkillId, SkillDefinition>,
}

impl SkillTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, replacing any previous one with the same id.
    pub fn insert(&mut self, skill: SkillDefinition) {
        self.skills.insert(skill.id, skill);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl FromIterator<SkillDefinition> for SkillTable {
    fn from_iter<I: IntoIterator<Item = SkillDefinition>>(iter: I) -> Self {
        let mut table = Self::new();
        for skill in iter {
            table.insert(skill);
        }
        table
    }
}

impl SkillOracle for SkillTable {
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.get(&id)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TribeTable {
    tribes: BTreeMap<TribeId, TribeTemplate>,
}

impl TribeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tribe: TribeTemplate) {
        self.tribes.insert(tribe.id, tribe);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TribeTemplate> {
        self.tribes.values()
    }

    pub fn len(&self) -> usize {
        self.tribes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tribes.is_empty()
    }
}

impl FromIterator<TribeTemplate> for TribeTable {
    fn from_iter<I: IntoIterator<Item = TribeTemplate>>(iter: I) -> Self {
        let mut table = Self::new();
        for tribe in iter {
            table.insert(tribe);
        }
        table
    }
}

impl TribeOracle for TribeTable {
    fn tribe(&self, id: TribeId) -> Option<&TribeTemplate> {
        self.tribes.get(&id)
    }

    fn tribe_ids(&self) -> Vec<TribeId> {
        self.tribes.keys().copied().collect()
    }
}
