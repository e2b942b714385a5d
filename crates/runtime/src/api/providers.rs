//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! run with human input, scripted fixtures, or the battle AI playing the
//! ally side.
use std::collections::VecDeque;

use async_trait::async_trait;
use battle_core::{BattleAction, BattleAi, BattleConfig, BattleState, CombatantId};
use tokio::sync::Mutex;

use super::errors::{Result, RuntimeError};
use crate::oracle::OracleManager;

/// Trait for providing actions for player-controlled combatants.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - AI auto-battle
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `actor` based on a snapshot of the battle.
    async fn provide_action(&self, actor: CombatantId, state: &BattleState) -> Result<BattleAction>;
}

/// Lets the battle AI play the ally side with the standard weight table.
pub struct AiActionProvider {
    oracles: OracleManager,
    config: BattleConfig,
}

impl AiActionProvider {
    pub fn new(oracles: OracleManager, config: BattleConfig) -> Self {
        Self { oracles, config }
    }
}

#[async_trait]
impl ActionProvider for AiActionProvider {
    async fn provide_action(&self, actor: CombatantId, state: &BattleState) -> Result<BattleAction> {
        let env = self.oracles.as_battle_env();
        let decision = BattleAi::new(&self.config)
            .decide(state, actor, &env)
            .map_err(|source| RuntimeError::AiDecision { actor, source })?;

        tracing::debug!(%actor, action = ?decision.action, score = ?decision.score, "AI provided action");
        Ok(decision.action)
    }
}

/// Replays a fixed list of actions in order. The actor in each queued action
/// is replaced by the combatant being asked.
pub struct ScriptedActionProvider {
    actions: Mutex<VecDeque<BattleAction>>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = BattleAction>) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.actions.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(&self, actor: CombatantId, _state: &BattleState) -> Result<BattleAction> {
        let mut action = self
            .actions
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::ProviderExhausted { actor })?;
        action.actor = actor;
        Ok(action)
    }
}
