//! Skill definitions implementing [`encounter_core::SkillOracle`].
use encounter_core::{SkillDefinition, SkillId, SkillOracle, SkillTable};

/// SkillOracle implementation with static skill definitions
#[derive(Clone, Debug, Default)]
pub struct SkillOracleImpl {
    table: SkillTable,
}

impl SkillOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: SkillTable) -> Self {
        Self { table }
    }

    /// Add or replace a skill definition
    pub fn add_skill(&mut self, skill: SkillDefinition) {
        self.table.insert(skill);
    }

    /// Create with a basic melee strike and a slow hostile claw
    pub fn test_skills() -> Self {
        let mut oracle = Self::new();

        // Skill 1: cost-free strike
        oracle.add_skill(SkillDefinition::physical(SkillId(1), 10.0, 1.0));

        // Skill 2: claw with cast and recast time
        let mut claw = SkillDefinition::physical(SkillId(2), 8.0, 1.0);
        claw.cast_time_ms = 200;
        claw.recast_time_ms = 400;
        oracle.add_skill(claw);

        oracle
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl SkillOracle for SkillOracleImpl {
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.table.skill(id)
    }
}
