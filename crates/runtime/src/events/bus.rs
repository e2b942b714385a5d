//! Topic-based event bus implementation.

use std::collections::HashMap;

use battle_core::{BattleAction, BattleEvent, BattleMode, RejectReason};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Round starts and turn order
    Round,
    /// Resolved and skipped actions, faints, rejected submissions
    Action,
    /// Status ticks and expiries
    Status,
    /// Battle start and end
    Lifecycle,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Round, Topic::Action, Topic::Status, Topic::Lifecycle];
}

/// Event wrapper published on the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The worker started a battle.
    Started { seed: u64, mode: BattleMode },
    /// An event emitted by the engine.
    Battle(BattleEvent),
    /// A player submission was refused; the battle state is unchanged.
    Rejected {
        action: BattleAction,
        reason: RejectReason,
    },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Started { .. } => Topic::Lifecycle,
            Event::Rejected { .. } => Topic::Action,
            Event::Battle(event) => match event {
                BattleEvent::RoundStarted { .. } => Topic::Round,
                BattleEvent::ActionResolved { .. }
                | BattleEvent::ActionSkipped { .. }
                | BattleEvent::CombatantFainted { .. } => Topic::Action,
                BattleEvent::StatusTicked { .. } | BattleEvent::StatusExpired { .. } => Topic::Status,
                BattleEvent::BattleEnded { .. } => Topic::Lifecycle,
            },
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    round: broadcast::Sender<Event>,
    action: broadcast::Sender<Event>,
    status: broadcast::Sender<Event>,
    lifecycle: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            round: broadcast::channel(capacity).0,
            action: broadcast::channel(capacity).0,
            status: broadcast::channel(capacity).0,
            lifecycle: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Round => &self.round,
            Topic::Action => &self.action,
            Topic::Status => &self.status,
            Topic::Lifecycle => &self.lifecycle,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
