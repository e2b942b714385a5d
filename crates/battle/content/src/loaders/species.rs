//! Species catalog loader.

use std::path::Path;

use battle_core::{BattleConfig, SpeciesTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Species catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesCatalog {
    pub species: Vec<SpeciesTemplate>,
}

/// Loader for species templates from RON files.
pub struct SpeciesLoader;

impl SpeciesLoader {
    /// Load the species catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<SpeciesTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a species catalog from RON text.
    ///
    /// Shape checks only; ability references are checked by
    /// [`validate_tables`](crate::loaders::validate_tables) once every table is loaded.
    pub fn parse(content: &str) -> LoadResult<Vec<SpeciesTemplate>> {
        let catalog: SpeciesCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species catalog RON: {}", e))?;

        let mut seen = std::collections::BTreeSet::new();
        for species in &catalog.species {
            if !seen.insert(species.id) {
                anyhow::bail!("Duplicate species id {} ('{}')", species.id, species.name);
            }
            if species.elements.is_empty() || species.elements.len() > BattleConfig::MAX_ELEMENTS {
                anyhow::bail!(
                    "Species '{}' must have 1-{} elements, found {}",
                    species.name,
                    BattleConfig::MAX_ELEMENTS,
                    species.elements.len()
                );
            }
            if species.stats.hp == 0 {
                anyhow::bail!("Species '{}' has zero max HP", species.name);
            }
        }

        Ok(catalog.species)
    }
}
