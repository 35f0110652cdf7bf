//! Owning registry of every character taking part in the simulation.

use std::collections::BTreeMap;

use super::character::Character;
use super::ids::{CharacterId, IdAllocator};
use crate::error::EncounterError;

/// Canonical owner of character records.
///
/// Battlefields, parties and aggro trackers only hold [`CharacterId`]s; a
/// removed character therefore shows up as a lookup miss everywhere else.
/// Iteration order is ascending id so ticks are deterministic.
#[derive(Clone, Debug, Default)]
pub struct CharacterRegistry {
    characters: BTreeMap<CharacterId, Character>,
    ids: IdAllocator,
}

impl CharacterRegistry {
    pub fn new() -> Self {
        Self {
            characters: BTreeMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Allocates a fresh id and inserts the character built for it.
    ///
    /// # Errors
    ///
    /// `IdsExhausted` once every character id has been handed out.
    pub fn insert_with(
        &mut self,
        build: impl FnOnce(CharacterId) -> Character,
    ) -> Result<CharacterId, EncounterError> {
        let id = CharacterId(self.ids.allocate().ok_or(EncounterError::IdsExhausted)?);
        self.characters.insert(id, build(id));
        Ok(id)
    }

    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        self.characters.remove(&id)
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.characters.contains_key(&id)
    }

    /// Returns the character only when it exists and is alive.
    pub fn living(&self, id: CharacterId) -> Option<&Character> {
        self.get(id).filter(|character| !character.is_dead())
    }

    /// Snapshot of all registered ids, safe to iterate while mutating the registry.
    pub fn ids(&self) -> Vec<CharacterId> {
        self.characters.keys().copied().collect()
    }

    /// Ids of characters whose hit points are above zero.
    pub fn living_ids(&self) -> Vec<CharacterId> {
        self.characters
            .values()
            .filter(|character| !character.is_dead())
            .map(|character| character.id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Transform;
    use crate::state::{MapId, StatBlock};

    #[test]
    fn ids_are_never_reused() {
        let mut registry = CharacterRegistry::new();
        let first = registry
            .insert_with(|id| {
                Character::player(id, MapId(1), Transform::IDENTITY, StatBlock::default())
            })
            .unwrap();
        registry.remove(first);
        let second = registry
            .insert_with(|id| {
                Character::player(id, MapId(1), Transform::IDENTITY, StatBlock::default())
            })
            .unwrap();

        assert_ne!(first, second);
        assert!(registry.get(first).is_none());
    }

    #[test]
    fn living_filters_dead_characters() {
        let mut registry = CharacterRegistry::new();
        let id = registry
            .insert_with(|id| {
                Character::player(id, MapId(1), Transform::IDENTITY, StatBlock::default())
            })
            .unwrap();
        registry.get_mut(id).unwrap().pools.hit_points = 0.0;

        assert!(registry.living(id).is_none());
        assert!(registry.living_ids().is_empty());
        assert_eq!(registry.ids(), vec![id]);
    }
}
