//! Type chart loader.
//!
//! The chart file lists only the non-neutral cells as
//! `(attack, defend, effectiveness)` rows; every other pairing is neutral.

use std::path::Path;

use battle_core::{Effectiveness, Element, TypeChart};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Type chart structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeChartRows {
    pub rows: Vec<(Element, Element, Effectiveness)>,
}

/// Loader for the elemental effectiveness matrix.
pub struct TypeChartLoader;

impl TypeChartLoader {
    pub fn load(path: &Path) -> LoadResult<TypeChart> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse chart rows; a pairing listed twice is an error.
    pub fn parse(content: &str) -> LoadResult<TypeChart> {
        let chart: TypeChartRows = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse type chart RON: {}", e))?;

        let mut seen = std::collections::BTreeSet::new();
        for (attack, defend, _) in &chart.rows {
            if !seen.insert((*attack, *defend)) {
                anyhow::bail!("Type chart lists {} -> {} twice", attack, defend);
            }
        }

        Ok(TypeChart::from_rows(chart.rows))
    }
}
