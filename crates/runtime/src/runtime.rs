//! High-level runtime orchestrator.
//!
//! The runtime owns the battle worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive one battle.

use battle_core::{
    BattleConfig, BattleEngine, BattleSetup, Controller, Outcome, Progress, Submitted,
};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::api::{ActionProvider, BattleHandle, Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::oracle::OracleManager;
use crate::workers::{BattleWorker, Command};

/// Runtime configuration shared across the orchestrator and the worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle_config: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Battle seed. `None` draws a fresh one from the thread RNG.
    pub seed: Option<u64>,
    /// Who drives the ally side. With [`Controller::Ai`] the engine decides
    /// ally actions itself and no player provider is consulted.
    pub ally_controller: Controller,
    /// Rejected submissions tolerated per player turn before giving up.
    pub max_rejections: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle_config: BattleConfig::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
            seed: None,
            ally_controller: Controller::Player,
            max_rejections: 3,
        }
    }
}

/// Main runtime that orchestrates one battle.
///
/// Design: Runtime owns the worker and asks the player provider for input.
/// [`BattleHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: BattleHandle,
    player_provider: Option<Box<dyn ActionProvider>>,
    worker_handle: JoinHandle<()>,
    seed: u64,
    max_rejections: u32,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// The seed the battle was started with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Drive the battle through the next player decision.
    ///
    /// Advances the engine; if a player action is awaited, asks the player
    /// provider and submits it, retrying after rejections. Returns the
    /// outcome once the battle has ended.
    pub async fn step(&mut self) -> Result<Option<Outcome>> {
        let actor = match self.handle.advance().await? {
            Progress::Ended(outcome) => return Ok(Some(outcome)),
            Progress::AwaitingPlayer { actor } => actor,
        };

        let provider = self
            .player_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        for attempt in 1..=self.max_rejections.max(1) {
            let snapshot = self.handle.query_state().await?;
            let action = provider.provide_action(actor, &snapshot).await?;

            match self.handle.submit_player_action(action).await {
                Ok(Submitted::Queued) => return Ok(None),
                Ok(Submitted::Ended(outcome)) => return Ok(Some(outcome)),
                Err(error) if error.as_rejection().is_some() => {
                    tracing::warn!(%actor, attempt, %error, "player action rejected");
                }
                Err(error) => return Err(error),
            }
        }

        Err(RuntimeError::TooManyRejections {
            attempts: self.max_rejections.max(1),
        })
    }

    /// Run the battle to completion
    pub async fn run(&mut self) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.step().await? {
                return Ok(outcome);
            }
        }
    }

    /// Set the player action provider
    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every [`BattleHandle`] clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    setup: Option<BattleSetup>,
    player_provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            setup: None,
            player_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Rosters and mode of the battle to run.
    ///
    /// The seed and ally controller in `setup` are replaced by the ones in
    /// [`RuntimeConfig`].
    pub fn setup(mut self, setup: BattleSetup) -> Self {
        self.setup = Some(setup);
        self
    }

    /// Set player action provider (optional)
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and start the battle worker
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let setup = self
            .setup
            .ok_or(RuntimeError::MissingSetup)?
            .with_seed(seed)
            .with_ally_controller(self.config.ally_controller);

        let engine = {
            let env = oracles.as_battle_env();
            BattleEngine::start(&env, self.config.battle_config.clone(), &setup)
                .map_err(RuntimeError::Start)?
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = BattleHandle::new(command_tx, event_bus.clone());

        event_bus.publish(Event::Started {
            seed,
            mode: setup.mode,
        });

        let worker = BattleWorker::new(engine, oracles, command_rx, event_bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            player_provider: self.player_provider,
            worker_handle,
            seed,
            max_rejections: self.config.max_rejections,
        })
    }
}
