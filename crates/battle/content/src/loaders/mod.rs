//! Content loaders for reading battle data from files.
//!
//! Each loader parses one file format into `battle-core` types; the
//! [`ContentFactory`] assembles them into a [`ContentBundle`].

pub mod abilities;
pub mod config;
pub mod factory;
pub mod species;
pub mod statuses;
pub mod type_chart;
pub mod validate;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use species::SpeciesLoader;
pub use statuses::StatusLoader;
pub use type_chart::TypeChartLoader;
pub use validate::validate_tables;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
