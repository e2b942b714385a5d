//! Headless battle simulator.
//!
//! Composition root that loads the content tables, builds a
//! [`battle_runtime::Runtime`] per encounter and lets the AI play both sides.
//! Two modes are supported: a single battle between fixed rosters, and an
//! endless run where the surviving allies carry their HP from wave to wave.

pub mod config;
pub mod logging;
pub mod sim;

pub use config::{SimConfig, SimMode};
pub use sim::{BattleReport, RunSummary, Simulator};
