//! Deterministic battle rules for vasen encounters.
//!
//! `battle-core` defines the canonical rules (turn order, action validation,
//! ability resolution, status effects, opponent AI) and exposes pure APIs
//! reused by the runtime and offline tools. All state mutation flows through
//! [`engine::BattleEngine`]; read-only tables and randomness are injected
//! through the oracles in [`env`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod status;

#[cfg(test)]
pub(crate) mod test_support;

pub use action::{ActionKind, BattleAction, RejectReason};
pub use ai::{AiDecisionFailure, BattleAi, Candidate, Decision};
pub use combat::{ResolutionResult, TargetOutcome, expected_damage, resolve_ability};
pub use config::{AiTuning, AiWeights, BattleConfig, ConfigError};
pub use engine::{
    BattleEngine, BattleError, BattleEvent, BattleObserver, BattleSetup, DataIntegrityError,
    Progress, Rewards, SkipReason, Submitted, TerminalStateViolation, start_battle,
};
pub use env::{
    Ability, AbilityEffect, AbilityId, AbilityOracle, BaseStats, BattleEnv, Effectiveness,
    Element, Env, OracleError, PcgRng, RngOracle, SpeciesId, SpeciesOracle, SpeciesTemplate,
    Stat, StackingPolicy, StatusDefinition, StatusId, StatusKind, StatusOracle, TableSnapshot,
    TargetSelector, TypeChart, TypeChartOracle,
};
pub use error::{EngineError, ErrorSeverity};
pub use state::{
    BattleMode, BattlePhase, BattleState, CombatantId, CombatantState, Controller, Outcome,
    ResourceMeter, RosterEntry, Side,
};
pub use status::{ApplyOutcome, StatusEffect, StatusEffectTracker, StatusEffects};
