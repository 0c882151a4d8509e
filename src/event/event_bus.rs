// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for dispatching server events.

use tokio::sync::broadcast;

use super::{EventTopic, KlippyEvent};

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus the host publishes server events on.
///
/// Built on tokio's broadcast channel: every subscription receives its own
/// copy of each event, filtered down to the topics it registered for.
///
/// # Capacity
///
/// The bus has a fixed capacity (default 256). A subscriber that falls that
/// far behind skips the oldest events and logs a warning.
///
/// # Examples
///
/// ```
/// use moonraker_feishu::event::{EventBus, EventTopic, KlippyEvent};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bus = EventBus::new();
/// let mut sub = bus.subscribe(&[EventTopic::KlippyShutdown]);
///
/// bus.publish(KlippyEvent::Started("ready".to_string()));
/// bus.publish(KlippyEvent::Shutdown("MCU lost".to_string()));
///
/// // The started event is filtered out.
/// assert_eq!(
///     sub.next().await,
///     Some(KlippyEvent::Shutdown("MCU lost".to_string()))
/// );
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<KlippyEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to the given topics.
    ///
    /// Only events published after this call are received.
    #[must_use]
    pub fn subscribe(&self, topics: &[EventTopic]) -> EventSubscription {
        for topic in topics {
            tracing::debug!(topic = %topic, "Registering event handler");
        }
        EventSubscription {
            receiver: self.sender.subscribe(),
            topics: topics.to_vec(),
        }
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event to all subscribers.
    ///
    /// If there are no subscribers, the event is silently discarded.
    pub fn publish(&self, event: KlippyEvent) {
        // Ignore errors (no subscribers)
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Topic-filtered receiving end of an [`EventBus`].
#[derive(Debug)]
pub struct EventSubscription {
    receiver: broadcast::Receiver<KlippyEvent>,
    topics: Vec<EventTopic>,
}

impl EventSubscription {
    /// Returns the topics this subscription receives.
    #[must_use]
    pub fn topics(&self) -> &[EventTopic] {
        &self.topics
    }

    /// Waits for the next event on a subscribed topic.
    ///
    /// Returns `None` once the bus has been dropped.
    pub async fn next(&mut self) -> Option<KlippyEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.topics.contains(&event.topic()) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event subscriber lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
