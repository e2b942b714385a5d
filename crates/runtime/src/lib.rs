//! Async session layer for vasen battles.
//!
//! This crate hosts a [`battle_core::BattleEngine`] in a worker task and
//! exposes it through a cloneable [`BattleHandle`]. Consumers embed
//! [`Runtime`] to drive rounds with pluggable [`ActionProvider`]s and
//! subscribe to engine events by [`Topic`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] bundles the read-only tables and RNG
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, AiActionProvider, BattleHandle, Result, RuntimeError, ScriptedActionProvider,
};
pub use events::{Event, EventBus, Topic};
pub use oracle::OracleManager;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
