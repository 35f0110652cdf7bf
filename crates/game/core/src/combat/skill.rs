//! Skill cost checks and damage resolution.

use crate::env::SkillDefinition;
use crate::error::EncounterError;
use crate::state::{CharacterId, CharacterRegistry, Pools, StatBlock};

/// Damage dealt by one skill application.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Damage {
    pub hit_points: f32,
    pub magic_points: f32,
}

/// Resolves the numeric outcome of using one skill.
///
/// # Formula
///
/// ```text
/// physical_attack = strength_damage_rate * user.strength
/// magical_attack  = intelligence_damage_rate * user.intelligence
/// damage_rate     = physical_attack / receiver.vitality + magical_attack / receiver.mind
/// hp_damage       = base_physical_damage * damage_rate
/// mp_damage       = base_magical_damage * damage_rate
/// ```
///
/// Receiver vitality and mind are clamped to [`SkillResolver::MIN_DEFENSE`]
/// before dividing.
#[derive(Clone, Copy, Debug)]
pub struct SkillResolver<'a> {
    skill: &'a SkillDefinition,
}

impl<'a> SkillResolver<'a> {
    pub const MIN_DEFENSE: f32 = 1.0;

    pub fn new(skill: &'a SkillDefinition) -> Self {
        Self { skill }
    }

    pub fn skill(&self) -> &'a SkillDefinition {
        self.skill
    }

    /// Both pools must strictly exceed the skill's costs.
    pub fn can_afford(&self, pools: &Pools) -> bool {
        pools.hit_points > self.skill.hit_point_cost
            && pools.magic_points > self.skill.magic_point_cost
    }

    /// Debits the skill's costs from `user`.
    ///
    /// # Errors
    ///
    /// - `CharacterNotFound` if `user` is not registered
    /// - `CharacterDead` if `user` is dead
    /// - `InsufficientResources` if either pool does not exceed its cost;
    ///   the pools are left untouched
    pub fn consume(
        &self,
        characters: &mut CharacterRegistry,
        user: CharacterId,
    ) -> Result<(), EncounterError> {
        let character = characters
            .get_mut(user)
            .ok_or(EncounterError::CharacterNotFound(user))?;
        if character.is_dead() {
            return Err(EncounterError::CharacterDead(user));
        }
        if !self.can_afford(&character.pools) {
            return Err(EncounterError::InsufficientResources {
                character: user,
                skill: self.skill.id,
                hit_points: character.pools.hit_points,
                magic_points: character.pools.magic_points,
            });
        }

        character.pools.hit_points -= self.skill.hit_point_cost;
        character.pools.magic_points -= self.skill.magic_point_cost;
        Ok(())
    }

    /// Damage `user` would deal to `receiver`. Pure function of the two stat blocks.
    pub fn damage(&self, user: &StatBlock, receiver: &StatBlock) -> Damage {
        let physical_attack = self.skill.strength_damage_rate * user.strength;
        let magical_attack = self.skill.intelligence_damage_rate * user.intelligence;
        let damage_rate = physical_attack / receiver.vitality.max(Self::MIN_DEFENSE)
            + magical_attack / receiver.mind.max(Self::MIN_DEFENSE);

        Damage {
            hit_points: self.skill.base_physical_damage * damage_rate,
            magic_points: self.skill.base_magical_damage * damage_rate,
        }
    }

    /// Pays the cost and applies the damage to `receiver`.
    ///
    /// Nothing is mutated unless every check passes. Receiver pools stay in
    /// `[0, max]`.
    ///
    /// # Errors
    ///
    /// Lookup failures for either side, `CharacterDead` for a dead user or
    /// receiver, and `InsufficientResources` when the cost cannot be paid.
    pub fn apply(
        &self,
        characters: &mut CharacterRegistry,
        user: CharacterId,
        receiver: CharacterId,
    ) -> Result<Damage, EncounterError> {
        let user_stats = characters
            .get(user)
            .ok_or(EncounterError::CharacterNotFound(user))?
            .stats;
        let target = characters
            .get(receiver)
            .ok_or(EncounterError::CharacterNotFound(receiver))?;
        if target.is_dead() {
            return Err(EncounterError::CharacterDead(receiver));
        }
        let damage = self.damage(&user_stats, &target.stats);

        self.consume(characters, user)?;

        let target = characters
            .get_mut(receiver)
            .ok_or(EncounterError::CharacterNotFound(receiver))?;
        target.pools.hit_points -= damage.hit_points;
        target.pools.magic_points -= damage.magic_points;
        let stats = target.stats;
        target.pools.clamp_to(&stats);

        Ok(damage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Transform;
    use crate::state::{Character, MapId, SkillId, TribeId};

    fn hostile_stats() -> StatBlock {
        StatBlock {
            max_hit_points: 300.0,
            vitality: 70.0,
            mind: 30.0,
            ..StatBlock::default()
        }
    }

    fn attacker_stats() -> StatBlock {
        StatBlock {
            strength: 100.0,
            ..StatBlock::default()
        }
    }

    fn registry() -> (CharacterRegistry, CharacterId, CharacterId) {
        let mut characters = CharacterRegistry::new();
        let attacker = characters
            .insert_with(|id| Character::player(id, MapId(1), Transform::IDENTITY, attacker_stats()))
            .unwrap();
        let hostile = characters
            .insert_with(|id| {
                Character::hostile(id, TribeId(1), MapId(1), Transform::IDENTITY, hostile_stats())
            })
            .unwrap();
        (characters, attacker, hostile)
    }

    #[test]
    fn strength_skill_against_sturdy_hostile() {
        let (mut characters, attacker, hostile) = registry();
        let skill = SkillDefinition::physical(SkillId(1), 10.0, 1.0);

        let damage = SkillResolver::new(&skill)
            .apply(&mut characters, attacker, hostile)
            .unwrap();

        // damage_rate = 100 / 70 ≈ 1.4286
        assert!((damage.hit_points - 14.2857).abs() < 1e-3);
        assert_eq!(damage.magic_points, 0.0);
        let hp = characters.get(hostile).unwrap().pools.hit_points;
        assert!((hp - 285.7143).abs() < 1e-3);
    }

    #[test]
    fn cost_must_be_strictly_exceeded() {
        let (mut characters, attacker, hostile) = registry();
        let mut skill = SkillDefinition::physical(SkillId(1), 10.0, 1.0);
        skill.magic_point_cost = 50.0;

        let error = SkillResolver::new(&skill)
            .apply(&mut characters, attacker, hostile)
            .unwrap_err();

        assert!(matches!(error, EncounterError::InsufficientResources { .. }));
        assert_eq!(characters.get(attacker).unwrap().pools.magic_points, 50.0);
        assert_eq!(characters.get(hostile).unwrap().pools.hit_points, 300.0);
    }

    #[test]
    fn consume_debits_both_pools() {
        let (mut characters, attacker, _) = registry();
        let mut skill = SkillDefinition::physical(SkillId(1), 10.0, 1.0);
        skill.hit_point_cost = 5.0;
        skill.magic_point_cost = 20.0;

        SkillResolver::new(&skill)
            .consume(&mut characters, attacker)
            .unwrap();

        let pools = characters.get(attacker).unwrap().pools;
        assert_eq!(pools, Pools::new(95.0, 30.0));
    }

    #[test]
    fn hit_points_never_drop_below_zero() {
        let (mut characters, attacker, hostile) = registry();
        let skill = SkillDefinition::physical(SkillId(1), 10_000.0, 1.0);

        SkillResolver::new(&skill)
            .apply(&mut characters, attacker, hostile)
            .unwrap();

        let target = characters.get(hostile).unwrap();
        assert_eq!(target.pools.hit_points, 0.0);
        assert!(target.is_dead());
    }

    #[test]
    fn negative_damage_is_capped_at_maximum() {
        let (mut characters, attacker, hostile) = registry();
        let skill = SkillDefinition::physical(SkillId(1), -10_000.0, 1.0);

        SkillResolver::new(&skill)
            .apply(&mut characters, attacker, hostile)
            .unwrap();

        assert_eq!(characters.get(hostile).unwrap().pools.hit_points, 300.0);
    }

    #[test]
    fn zero_defense_is_clamped() {
        let skill = SkillDefinition::physical(SkillId(1), 10.0, 1.0);
        let receiver = StatBlock {
            vitality: 0.0,
            mind: 0.0,
            ..StatBlock::default()
        };

        let damage = SkillResolver::new(&skill).damage(&attacker_stats(), &receiver);

        assert!(damage.hit_points.is_finite());
        assert_eq!(damage.hit_points, 1_000.0);
    }

    #[test]
    fn dead_receiver_is_rejected_without_cost() {
        let (mut characters, attacker, hostile) = registry();
        characters.get_mut(hostile).unwrap().pools.hit_points = 0.0;
        let mut skill = SkillDefinition::physical(SkillId(1), 10.0, 1.0);
        skill.magic_point_cost = 10.0;

        let error = SkillResolver::new(&skill)
            .apply(&mut characters, attacker, hostile)
            .unwrap_err();

        assert_eq!(error, EncounterError::CharacterDead(hostile));
        assert_eq!(characters.get(attacker).unwrap().pools.magic_points, 50.0);
    }
}
