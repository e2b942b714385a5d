//! Data-driven battle content and loaders.
//!
//! This crate houses the default vasen data set and loaders for RON/TOML files:
//! - Ability definitions (`abilities.ron`)
//! - Species templates (`species.ron`)
//! - Status definitions (`statuses.ron`)
//! - Type chart rows (`type_chart.ron`)
//! - Battle tuning (`battle.toml`)
//!
//! Content is turned into a [`battle_core::TableSnapshot`] that backs every
//! read-only oracle; it never appears in battle state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ConfigLoader, ContentBundle, ContentFactory, LoadResult, SpeciesLoader,
    StatusLoader, TypeChartLoader, validate_tables,
};
