//! Skill definitions and oracle interface.

use crate::state::SkillId;

/// Static description of a skill.
///
/// Damage coefficients feed [`crate::combat::SkillResolver`]; cast and recast
/// times drive the hostile skill phases.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    /// Hit points the user must strictly exceed and pays on use.
    pub hit_point_cost: f32,
    /// Magic points the user must strictly exceed and pays on use.
    pub magic_point_cost: f32,
    pub base_physical_damage: f32,
    pub base_magical_damage: f32,
    pub strength_damage_rate: f32,
    pub intelligence_damage_rate: f32,
    /// Delay between announcing and applying the skill.
    pub cast_time_ms: u64,
    /// Cooldown after applying before the next action is judged.
    pub recast_time_ms: u64,
}

impl SkillDefinition {
    /// A cost-free physical skill, handy for tests and scripted content.
    pub fn physical(id: SkillId, base_physical_damage: f32, strength_damage_rate: f32) -> Self {
        Self {
            id,
            name: format!("skill-{}", id.0),
            hit_point_cost: 0.0,
            magic_point_cost: 0.0,
            base_physical_damage,
            base_magical_damage: 0.0,
            strength_damage_rate,
            intelligence_damage_rate: 0.0,
            cast_time_ms: 0,
            recast_time_ms: 0,
        }
    }
}

/// Oracle providing skill definitions by id.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition>;
}
