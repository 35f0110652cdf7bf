//! Hostile tribe catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use encounter_core::{TribeTable, TribeTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Tribe catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TribeCatalog {
    pub tribes: Vec<TribeTemplate>,
}

/// Loader for tribe templates from RON files.
pub struct TribeLoader;

impl TribeLoader {
    /// Load the tribe catalog from a RON file.
    ///
    /// Skill references are not resolved here; [`super::ContentFactory`]
    /// cross-checks them against the skill catalog.
    pub fn load(path: &Path) -> LoadResult<Vec<TribeTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<TribeTemplate>> {
        let catalog: TribeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tribe catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for tribe in &catalog.tribes {
            if !seen.insert(tribe.id) {
                anyhow::bail!("duplicate tribe id {}", tribe.id);
            }
            if tribe.stats.max_hit_points <= 0.0 {
                anyhow::bail!("tribe {} ({}) must have positive max_hit_points", tribe.id, tribe.name);
            }
        }
        Ok(catalog.tribes)
    }

    pub fn load_table(path: &Path) -> LoadResult<TribeTable> {
        Ok(Self::load(path)?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::{SkillId, TribeId, TribeOracle};

    const GOBLIN: &str = r#"(
        id: TribeId(1),
        name: "Goblin",
        stats: (
            max_hit_points: 120.0,
            max_magic_points: 30.0,
            strength: 12.0,
            intelligence: 4.0,
            vitality: 8.0,
            mind: 5.0,
            move_speed: 3.5,
            turn_rate: 3.0,
        ),
        skills: [SkillId(1), SkillId(2)],
    )"#;

    #[test]
    fn parses_tribes_in_id_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tribes.ron");
        let orc = GOBLIN
            .replace("TribeId(1)", "TribeId(5)")
            .replace("Goblin", "Orc");
        std::fs::write(&path, format!("(tribes: [{orc}, {GOBLIN}])")).unwrap();

        let table = TribeLoader::load_table(&path).unwrap();

        assert_eq!(table.tribe_ids(), vec![TribeId(1), TribeId(5)]);
        let goblin = table.tribe(TribeId(1)).unwrap();
        assert_eq!(goblin.skills, vec![SkillId(1), SkillId(2)]);
        assert_eq!(goblin.stats.vitality, 8.0);
    }

    #[test]
    fn lifeless_tribe_is_rejected() {
        let broken = GOBLIN.replace("max_hit_points: 120.0", "max_hit_points: 0.0");

        let error = TribeLoader::parse(&format!("(tribes: [{broken}])")).unwrap_err();

        assert!(error.to_string().contains("max_hit_points"));
    }
}
