//! Runtime wrapper around the static battle tables.
//!
//! The tables are immutable at runtime and shared behind an [`Arc`]; dynamic
//! state lives in the worker's [`battle_core::BattleEngine`].

use std::sync::Arc;

use battle_content::ContentBundle;
use battle_core::{BattleEnv, PcgRng, TableSnapshot};

/// Owns the read-only tables and the RNG oracle, and builds [`BattleEnv`]s on demand.
#[derive(Clone, Debug)]
pub struct OracleManager {
    tables: Arc<TableSnapshot>,
    rng: PcgRng,
}

impl OracleManager {
    pub fn new(tables: Arc<TableSnapshot>) -> Self {
        Self {
            tables,
            rng: PcgRng, // PcgRng is stateless
        }
    }

    pub fn from_bundle(bundle: &ContentBundle) -> Self {
        Self::new(Arc::new(bundle.tables.clone()))
    }

    /// Borrowed environment for one engine call.
    pub fn as_battle_env(&self) -> BattleEnv<'_> {
        BattleEnv::from_snapshot(&self.tables, &self.rng)
    }

    pub fn tables(&self) -> &TableSnapshot {
        &self.tables
    }
}
