//! Cloneable façade for issuing commands to the battle worker.
//!
//! [`BattleHandle`] hides channel plumbing and offers async helpers for
//! driving the battle or streaming events from specific topics.
use std::collections::HashMap;

use battle_core::{BattleAction, BattleState, Candidate, CombatantId, Progress, Submitted};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to one running battle.
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl BattleHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Drive the battle until a player action is needed or it ends.
    pub async fn advance(&self) -> Result<Progress> {
        self.request(|reply| Command::Advance { reply }).await?
    }

    /// Submit the awaited player action.
    ///
    /// A rejected action comes back as [`RuntimeError::Battle`]; use
    /// [`RuntimeError::as_rejection`] to read the reason. The battle state is
    /// unchanged in that case and another action may be submitted.
    pub async fn submit_player_action(&self, action: BattleAction) -> Result<Submitted> {
        self.request(|reply| Command::Submit { action, reply }).await?
    }

    /// Legal ability options for `actor` this round.
    pub async fn options(&self, actor: CombatantId) -> Result<Vec<Candidate>> {
        self.request(|reply| Command::Options { actor, reply }).await?
    }

    /// Query the current battle state (read-only snapshot).
    pub async fn query_state(&self) -> Result<BattleState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic.
    ///
    /// # Topics
    ///
    /// - `Topic::Round` - round starts
    /// - `Topic::Action` - resolved and skipped actions, faints, rejected submissions
    /// - `Topic::Status` - status ticks and expiries
    /// - `Topic::Lifecycle` - battle start and end
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
