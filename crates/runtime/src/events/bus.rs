//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::RuntimeEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Round transitions and event/slot lifecycle
    Round,
    /// Per-player skill assignment
    Skills,
    /// Administrative commands
    Admin,
}

impl RuntimeEvent {
    pub fn topic(&self) -> Topic {
        match self {
            RuntimeEvent::RoundStarted { .. }
            | RuntimeEvent::RoundEnded { .. }
            | RuntimeEvent::ModifierApplied { .. }
            | RuntimeEvent::ModifierReverted { .. }
            | RuntimeEvent::ModifierFaulted { .. } => Topic::Round,
            RuntimeEvent::SkillsAssigned { .. } | RuntimeEvent::SkillsRemoved { .. } => {
                Topic::Skills
            }
            RuntimeEvent::AdminExecuted { .. } | RuntimeEvent::AdminRejected { .. } => {
                Topic::Admin
            }
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created up front and never change,
/// so publishing needs no lock.
#[derive(Clone)]
pub struct EventBus {
    round: broadcast::Sender<RuntimeEvent>,
    skills: broadcast::Sender<RuntimeEvent>,
    admin: broadcast::Sender<RuntimeEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            round: broadcast::channel(capacity).0,
            skills: broadcast::channel(capacity).0,
            admin: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<RuntimeEvent> {
        match topic {
            Topic::Round => &self.round,
            Topic::Skills => &self.skills,
            Topic::Admin => &self.admin,
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Best-effort: never blocks, and having no subscribers is normal.
    pub fn publish(&self, event: RuntimeEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RuntimeEvent> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
