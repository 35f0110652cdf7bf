//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{NotificationEvent, SimulationEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Player-facing notifications (skill announcements, damage, deaths, spawns)
    Notification,
    /// Tick progress and rejected commands
    Simulation,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Notification(NotificationEvent),
    Simulation(SimulationEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Notification(_) => Topic::Notification,
            Event::Simulation(_) => Topic::Simulation,
        }
    }
}

struct Channels {
    notification: broadcast::Sender<Event>,
    simulation: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Notification => &self.notification,
            Topic::Simulation => &self.simulation,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events published while
/// a topic has no subscriber are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Channels {
                notification: broadcast::channel(capacity).0,
                simulation: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "runtime::events", ?topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut simulation = bus.subscribe(Topic::Simulation);
        let mut notifications = bus.subscribe(Topic::Notification);

        bus.publish(Event::Simulation(SimulationEvent::Ticked {
            clock_ms: 100,
            elapsed_ms: 100,
            characters: 0,
            battlefields: 0,
        }));

        assert!(matches!(
            simulation.recv().await,
            Ok(Event::Simulation(SimulationEvent::Ticked { clock_ms: 100, .. }))
        ));
        assert!(notifications.try_recv().is_err());
    }
}
