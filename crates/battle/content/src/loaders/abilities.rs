//! Ability catalog loader.

use std::path::Path;

use battle_core::Ability;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<Ability>,
}

/// Loader for ability definitions from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load the ability catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Ability>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an ability catalog from RON text.
    ///
    /// Rejects duplicate ids and the id reserved for the basic attack.
    pub fn parse(content: &str) -> LoadResult<Vec<Ability>> {
        let catalog: AbilityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        let mut seen = std::collections::BTreeSet::new();
        for ability in &catalog.abilities {
            if ability.id.is_basic_attack() {
                anyhow::bail!("Ability '{}' uses the reserved basic-attack id", ability.name);
            }
            if !seen.insert(ability.id) {
                anyhow::bail!("Duplicate ability id {} ('{}')", ability.id, ability.name);
            }
            if ability.accuracy > 100 {
                anyhow::bail!(
                    "Ability '{}' has accuracy {} (expected 0-100)",
                    ability.name,
                    ability.accuracy
                );
            }
        }

        Ok(catalog.abilities)
    }
}
