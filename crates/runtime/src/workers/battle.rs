//! Battle worker that owns the authoritative [`battle_core::BattleEngine`].
//!
//! Receives commands from [`crate::BattleHandle`], drives the engine, and
//! publishes engine events to the [`EventBus`] through an engine observer.

use battle_core::{
    BattleAction, BattleEngine, BattleError, BattleEvent, BattleState, Candidate, CombatantId,
    Progress, Submitted,
};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus};
use crate::oracle::OracleManager;

/// Commands that can be sent to the battle worker
pub enum Command {
    /// Run the engine until it needs a player action or the battle ends.
    Advance {
        reply: oneshot::Sender<Result<Progress>>,
    },
    /// Validate and queue the awaited player action.
    Submit {
        action: BattleAction,
        reply: oneshot::Sender<Result<Submitted>>,
    },
    /// Legal options for a combatant this round.
    Options {
        actor: CombatantId,
        reply: oneshot::Sender<Result<Vec<Candidate>>>,
    },
    /// Query the current battle state (read-only).
    QueryState { reply: oneshot::Sender<BattleState> },
}

/// Background task that processes battle commands.
///
/// The worker is the only owner of the battle state; every mutation goes
/// through a command, one at a time.
pub struct BattleWorker {
    engine: BattleEngine,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl BattleWorker {
    /// Creates a new battle worker and hooks the event bus into the engine.
    pub fn new(
        mut engine: BattleEngine,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let bus = event_bus.clone();
        engine.add_observer(Box::new(move |event: &BattleEvent| {
            bus.publish(Event::Battle(event.clone()));
        }));

        tracing::info!(
            combatants = engine.state().combatants.len(),
            mode = %engine.state().mode,
            "BattleWorker initialized"
        );

        Self {
            engine,
            oracles,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(outcome = ?self.engine.outcome(), "BattleWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Advance { reply } => {
                let result = self.advance();
                if reply.send(result).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::Submit { action, reply } => {
                let result = self.submit(action);
                if reply.send(result).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            Command::Options { actor, reply } => {
                let env = self.oracles.as_battle_env();
                let result = self
                    .engine
                    .options_for(&env, actor)
                    .map_err(|e| RuntimeError::Battle(e.into()));
                if reply.send(result).is_err() {
                    debug!("Options reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.engine.state().clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn advance(&mut self) -> Result<Progress> {
        let env = self.oracles.as_battle_env();
        Ok(self.engine.advance(&env)?)
    }

    fn submit(&mut self, action: BattleAction) -> Result<Submitted> {
        let env = self.oracles.as_battle_env();
        match self.engine.submit_player_action(&env, action) {
            Ok(submitted) => Ok(submitted),
            Err(BattleError::Rejected(reason)) => {
                debug!(%reason, ?action, "player action rejected");
                self.event_bus.publish(Event::Rejected {
                    action,
                    reason: reason.clone(),
                });
                Err(BattleError::Rejected(reason).into())
            }
            Err(error) => Err(error.into()),
        }
    }
}
