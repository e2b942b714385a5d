//! Worker task that backs the runtime orchestration.
//!
//! The battle worker owns the engine and executes commands sent through
//! [`crate::BattleHandle`].

mod battle;

pub use battle::{BattleWorker, Command};
