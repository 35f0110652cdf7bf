//! Skill catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use encounter_core::{SkillDefinition, SkillTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

/// Loader for skill definitions from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load the skill catalog from a RON file.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed files, duplicate skill ids and
    /// negative costs or damage coefficients.
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillDefinition>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for skill in &catalog.skills {
            if !seen.insert(skill.id) {
                anyhow::bail!("duplicate skill id {}", skill.id);
            }
            let numbers = [
                skill.hit_point_cost,
                skill.magic_point_cost,
                skill.base_physical_damage,
                skill.base_magical_damage,
                skill.strength_damage_rate,
                skill.intelligence_damage_rate,
            ];
            if numbers.iter().any(|value| *value < 0.0) {
                anyhow::bail!("skill {} ({}) has a negative cost or rate", skill.id, skill.name);
            }
        }
        Ok(catalog.skills)
    }

    pub fn load_table(path: &Path) -> LoadResult<SkillTable> {
        Ok(Self::load(path)?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::{SkillId, SkillOracle};

    const SLASH: &str = r#"(
        id: SkillId(1),
        name: "Slash",
        hit_point_cost: 0.0,
        magic_point_cost: 5.0,
        base_physical_damage: 10.0,
        base_magical_damage: 0.0,
        strength_damage_rate: 1.0,
        intelligence_damage_rate: 0.0,
        cast_time_ms: 0,
        recast_time_ms: 800,
    )"#;

    #[test]
    fn parses_catalog_into_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills.ron");
        std::fs::write(&path, format!("(skills: [{SLASH}])")).unwrap();

        let table = SkillLoader::load_table(&path).unwrap();

        let slash = table.skill(SkillId(1)).unwrap();
        assert_eq!(slash.name, "Slash");
        assert_eq!(slash.recast_time_ms, 800);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let error = SkillLoader::parse(&format!("(skills: [{SLASH}, {SLASH}])")).unwrap_err();

        assert!(error.to_string().contains("duplicate skill id"));
    }

    #[test]
    fn negative_rates_are_rejected() {
        let broken = SLASH.replace("strength_damage_rate: 1.0", "strength_damage_rate: -1.0");

        let error = SkillLoader::parse(&format!("(skills: [{broken}])")).unwrap_err();

        assert!(error.to_string().contains("Slash"));
    }
}
