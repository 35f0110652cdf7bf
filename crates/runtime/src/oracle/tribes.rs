//! Tribe templates implementing [`encounter_core::TribeOracle`].
use encounter_core::{SkillId, StatBlock, TribeId, TribeOracle, TribeTable, TribeTemplate};

/// TribeOracle implementation with static hostile templates
#[derive(Clone, Debug, Default)]
pub struct TribeOracleImpl {
    table: TribeTable,
}

impl TribeOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: TribeTable) -> Self {
        Self { table }
    }

    /// Add or replace a tribe template
    pub fn add_tribe(&mut self, tribe: TribeTemplate) {
        self.table.insert(tribe);
    }

    /// Create with basic test tribes
    pub fn test_tribes() -> Self {
        let mut oracle = Self::new();

        // Tribe 1: sturdy brute clawing its target
        oracle.add_tribe(TribeTemplate {
            id: TribeId(1),
            name: "brute".into(),
            stats: StatBlock {
                max_hit_points: 300.0,
                vitality: 70.0,
                mind: 30.0,
                ..StatBlock::default()
            },
            skills: vec![SkillId(2)],
        });

        // Tribe 2: weak skirmisher without skills
        oracle.add_tribe(TribeTemplate {
            id: TribeId(2),
            name: "skirmisher".into(),
            stats: StatBlock {
                max_hit_points: 50.0,
                ..StatBlock::default()
            },
            skills: Vec::new(),
        });

        oracle
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl TribeOracle for TribeOracleImpl {
    fn tribe(&self, id: TribeId) -> Option<&TribeTemplate> {
        self.table.tribe(id)
    }

    fn tribe_ids(&self) -> Vec<TribeId> {
        self.table.tribe_ids()
    }
}
