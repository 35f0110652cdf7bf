//! Per-hostile hate bookkeeping.

use glam::Vec3;

use crate::state::{CharacterId, CharacterRegistry};

/// Hate one hostile holds against one character.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub character: CharacterId,
    /// Never negative.
    pub hate: f32,
}

/// Decaying, ranked set of aggro records owned by a hostile in battle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggroTracker {
    /// Sorted by descending hate after every [`AggroTracker::update`].
    targets: Vec<Target>,
}

impl AggroTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` to the hate held against `character`.
    ///
    /// A record is created only on first positive hate. The stored value is
    /// clamped to zero; a zeroed record stays until the next prune.
    pub fn change_hate(&mut self, character: CharacterId, delta: f32) {
        if let Some(target) = self
            .targets
            .iter_mut()
            .find(|target| target.character == character)
        {
            target.hate = (target.hate + delta).max(0.0);
        } else if delta > 0.0 {
            self.targets.push(Target {
                character,
                hate: delta,
            });
        }
    }

    pub fn hate_of(&self, character: CharacterId) -> Option<f32> {
        self.targets
            .iter()
            .find(|target| target.character == character)
            .map(|target| target.hate)
    }

    /// Drops the record for `character`, returning whether one existed.
    pub fn remove(&mut self, character: CharacterId) -> bool {
        let before = self.targets.len();
        self.targets.retain(|target| target.character != character);
        self.targets.len() != before
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    /// Decays, re-ranks and prunes the records for one tick.
    ///
    /// Records are dropped when their hate reaches zero, when the character is
    /// dead or unregistered, or when it stands farther than `leash_radius`
    /// from `origin`.
    pub fn update(
        &mut self,
        elapsed_secs: f32,
        decay_per_second: f32,
        leash_radius: f32,
        origin: Vec3,
        characters: &CharacterRegistry,
    ) {
        let decay = decay_per_second * elapsed_secs;
        for target in &mut self.targets {
            target.hate = (target.hate - decay).max(0.0);
        }

        // sort_by is stable: equal hate keeps insertion order.
        self.targets.sort_by(|a, b| b.hate.total_cmp(&a.hate));

        self.targets.retain(|target| {
            target.hate > 0.0
                && characters
                    .living(target.character)
                    .is_some_and(|character| character.position().distance(origin) <= leash_radius)
        });
    }

    /// Highest-hate living character.
    ///
    /// Dead entries are skipped rather than removed; the next update prunes them.
    pub fn current_target(&self, characters: &CharacterRegistry) -> Option<CharacterId> {
        let mut best: Option<&Target> = None;
        for target in &self.targets {
            if characters.living(target.character).is_none() {
                continue;
            }
            if best.is_none_or(|current| target.hate > current.hate) {
                best = Some(target);
            }
        }
        best.map(|target| target.character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Transform;
    use crate::state::{Character, MapId, StatBlock};

    fn spawn_player(characters: &mut CharacterRegistry, position: Vec3) -> CharacterId {
        characters
            .insert_with(|id| {
                Character::player(id, MapId(1), Transform::at(position), StatBlock::default())
            })
            .unwrap()
    }

    #[test]
    fn record_created_only_by_positive_hate() {
        let mut tracker = AggroTracker::new();
        tracker.change_hate(CharacterId(1), -5.0);
        tracker.change_hate(CharacterId(2), 0.0);
        assert!(tracker.is_empty());

        tracker.change_hate(CharacterId(1), 5.0);
        tracker.change_hate(CharacterId(1), -20.0);
        assert_eq!(tracker.hate_of(CharacterId(1)), Some(0.0));
    }

    #[test]
    fn update_decays_and_ranks() {
        let mut characters = CharacterRegistry::new();
        let low = spawn_player(&mut characters, Vec3::ZERO);
        let high = spawn_player(&mut characters, Vec3::ZERO);

        let mut tracker = AggroTracker::new();
        tracker.change_hate(low, 10.0);
        tracker.change_hate(high, 30.0);
        tracker.update(2.0, 1.0, 40.0, Vec3::ZERO, &characters);

        let ranked: Vec<_> = tracker.iter().copied().collect();
        assert_eq!(ranked[0].character, high);
        assert_eq!(ranked[0].hate, 28.0);
        assert_eq!(ranked[1].hate, 8.0);
        assert_eq!(tracker.current_target(&characters), Some(high));
    }

    #[test]
    fn prune_drops_exhausted_dead_and_leashed() {
        let mut characters = CharacterRegistry::new();
        let exhausted = spawn_player(&mut characters, Vec3::ZERO);
        let dead = spawn_player(&mut characters, Vec3::ZERO);
        let far = spawn_player(&mut characters, Vec3::new(100.0, 0.0, 0.0));
        let kept = spawn_player(&mut characters, Vec3::new(5.0, 0.0, 0.0));
        characters.get_mut(dead).unwrap().pools.hit_points = 0.0;

        let mut tracker = AggroTracker::new();
        tracker.change_hate(exhausted, 0.5);
        tracker.change_hate(dead, 50.0);
        tracker.change_hate(far, 50.0);
        tracker.change_hate(kept, 50.0);
        tracker.update(1.0, 1.0, 40.0, Vec3::ZERO, &characters);

        assert_eq!(tracker.len(), 1);
        assert!(tracker.hate_of(kept).is_some());
    }

    #[test]
    fn current_target_skips_dead_entries_before_prune() {
        let mut characters = CharacterRegistry::new();
        let top = spawn_player(&mut characters, Vec3::ZERO);
        let second = spawn_player(&mut characters, Vec3::ZERO);

        let mut tracker = AggroTracker::new();
        tracker.change_hate(top, 100.0);
        tracker.change_hate(second, 10.0);
        characters.get_mut(top).unwrap().pools.hit_points = 0.0;

        assert_eq!(tracker.current_target(&characters), Some(second));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn hate_never_increases_without_change_hate() {
        let mut characters = CharacterRegistry::new();
        let player = spawn_player(&mut characters, Vec3::ZERO);

        let mut tracker = AggroTracker::new();
        tracker.change_hate(player, 10.0);
        let mut previous = 10.0;
        for _ in 0..5 {
            tracker.update(0.5, 1.0, 40.0, Vec3::ZERO, &characters);
            let hate = tracker.hate_of(player).unwrap_or(0.0);
            assert!(hate <= previous);
            previous = hate;
        }
    }
}
