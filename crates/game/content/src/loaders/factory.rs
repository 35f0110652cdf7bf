//! Content factory for building oracle tables from a data directory.

use std::path::{Path, PathBuf};

use encounter_core::{EncounterConfig, SkillOracle, SkillTable, TribeTable};
use tracing::info;

use crate::loaders::{ConfigLoader, LoadResult, SkillLoader, TribeLoader};

/// Everything the engine needs from static data.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: EncounterConfig,
    pub skills: SkillTable,
    pub tribes: TribeTable,
}

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// └── tribes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load engine tunables from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EncounterConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load skill definitions from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillTable> {
        SkillLoader::load_table(&self.data_dir.join("skills.ron"))
    }

    /// Load tribe templates from `tribes.ron`.
    pub fn load_tribes(&self) -> LoadResult<TribeTable> {
        TribeLoader::load_table(&self.data_dir.join("tribes.ron"))
    }

    /// Load everything and check that every tribe skill exists.
    pub fn load_all(&self) -> LoadResult<Content> {
        let config = self.load_config()?;
        let skills = self.load_skills()?;
        let tribes = self.load_tribes()?;

        if tribes.is_empty() {
            anyhow::bail!("{} defines no tribes", self.data_dir.join("tribes.ron").display());
        }
        for tribe in tribes.iter() {
            if let Some(missing) = tribe.skills.iter().find(|id| skills.skill(**id).is_none()) {
                anyhow::bail!("tribe {} ({}) references unknown {}", tribe.id, tribe.name, missing);
            }
        }

        info!(
            target: "content",
            data_dir = %self.data_dir.display(),
            skills = skills.len(),
            tribes = tribes.len(),
            "content loaded"
        );
        Ok(Content {
            config,
            skills,
            tribes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::TribeOracle;

    fn shipped() -> ContentFactory {
        ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    #[test]
    fn shipped_content_is_consistent() {
        let content = shipped().load_all().unwrap();

        assert!(!content.skills.is_empty());
        assert!(!content.tribes.tribe_ids().is_empty());
    }

    #[test]
    fn unknown_tribe_skill_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = shipped();
        for file in ["config.toml", "tribes.ron"] {
            std::fs::copy(source.data_dir().join(file), dir.path().join(file)).unwrap();
        }
        std::fs::write(dir.path().join("skills.ron"), "(skills: [])").unwrap();

        let error = ContentFactory::new(dir.path()).load_all().unwrap_err();

        assert!(error.to_string().contains("references unknown"));
    }
}
