//! Content factory for building the table snapshot from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, TableSnapshot, TypeChart};

use crate::loaders::{
    AbilityLoader, ConfigLoader, LoadResult, SpeciesLoader, StatusLoader, TypeChartLoader,
    validate_tables,
};

const EMBEDDED_ABILITIES: &str = include_str!("../../data/abilities.ron");
const EMBEDDED_SPECIES: &str = include_str!("../../data/species.ron");
const EMBEDDED_STATUSES: &str = include_str!("../../data/statuses.ron");
const EMBEDDED_TYPE_CHART: &str = include_str!("../../data/type_chart.ron");
const EMBEDDED_CONFIG: &str = include_str!("../../data/battle.toml");

/// Everything a battle needs from content: the tables behind the oracles and
/// the tuning.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub tables: TableSnapshot,
    pub config: BattleConfig,
}

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml      (optional, defaults otherwise)
/// ├── abilities.ron
/// ├── species.ron
/// ├── statuses.ron
/// └── type_chart.ron   (optional, standard chart otherwise)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data set compiled into this crate.
    pub fn embedded() -> LoadResult<ContentBundle> {
        let tables = assemble(
            TypeChartLoader::parse(EMBEDDED_TYPE_CHART)?,
            StatusLoader::parse(EMBEDDED_STATUSES)?,
            AbilityLoader::parse(EMBEDDED_ABILITIES)?,
            SpeciesLoader::parse(EMBEDDED_SPECIES)?,
        )?;
        let config = ConfigLoader::parse(EMBEDDED_CONFIG)?;
        Ok(ContentBundle { tables, config })
    }

    /// Load battle tuning from `battle.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no battle.toml, using default tuning");
            Ok(BattleConfig::default())
        }
    }

    /// Load the type chart from `type_chart.ron`, or the standard chart if absent.
    pub fn load_type_chart(&self) -> LoadResult<TypeChart> {
        let path = self.data_dir.join("type_chart.ron");
        if path.exists() {
            TypeChartLoader::load(&path)
        } else {
            Ok(TypeChart::standard())
        }
    }

    /// Load and cross-check every table.
    pub fn load_tables(&self) -> LoadResult<TableSnapshot> {
        assemble(
            self.load_type_chart()?,
            StatusLoader::load(&self.data_dir.join("statuses.ron"))?,
            AbilityLoader::load(&self.data_dir.join("abilities.ron"))?,
            SpeciesLoader::load(&self.data_dir.join("species.ron"))?,
        )
    }

    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            tables: self.load_tables()?,
            config: self.load_config()?,
        };
        tracing::info!(data_dir = %self.data_dir.display(), "battle content loaded");
        Ok(bundle)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn assemble(
    chart: TypeChart,
    statuses: Vec<battle_core::StatusDefinition>,
    abilities: Vec<battle_core::Ability>,
    species: Vec<battle_core::SpeciesTemplate>,
) -> LoadResult<TableSnapshot> {
    let mut tables = TableSnapshot::new().with_chart(chart);
    for status in statuses {
        tables.insert_status(status);
    }
    for ability in abilities {
        tables.insert_ability(ability);
    }
    for template in species {
        tables.insert_species(template);
    }
    validate_tables(&tables)?;
    Ok(tables)
}
