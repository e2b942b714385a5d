//! Status definition loader.

use std::path::Path;

use battle_core::StatusDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Status catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCatalog {
    pub statuses: Vec<StatusDefinition>,
}

/// Loader for status definitions from RON files.
pub struct StatusLoader;

impl StatusLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StatusDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<StatusDefinition>> {
        let catalog: StatusCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse status catalog RON: {}", e))?;

        let mut seen = std::collections::BTreeSet::new();
        for status in &catalog.statuses {
            if !seen.insert(status.id) {
                anyhow::bail!("Duplicate status id {} ('{}')", status.id, status.name);
            }
            if status.duration == 0 {
                anyhow::bail!("Status '{}' has a zero duration", status.name);
            }
        }

        Ok(catalog.statuses)
    }
}
