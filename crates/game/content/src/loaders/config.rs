//! Encounter configuration loader.

use std::path::Path;

use encounter_core::EncounterConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine tunables from TOML files.
///
/// Keys missing from the file keep their default value.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EncounterConfig> {
        let config: EncounterConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.leash_radius < 0.0 || config.wander_radius < 0.0 {
            anyhow::bail!("leash_radius and wander_radius must not be negative");
        }
        if config.aggro_decay_per_second < 0.0 {
            anyhow::bail!("aggro_decay_per_second must not be negative");
        }
        Ok(config)
    }
}
