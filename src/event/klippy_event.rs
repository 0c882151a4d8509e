// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server event types.

use std::fmt;

use serde_json::{Map, Value};

/// Topic of a server event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTopic {
    /// `server:klippy_started`
    KlippyStarted,
    /// `server:klippy_shutdown`
    KlippyShutdown,
    /// `server:status_update`
    StatusUpdate,
}

impl EventTopic {
    /// Returns the topic name used by the host.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::KlippyStarted => "server:klippy_started",
            Self::KlippyShutdown => "server:klippy_shutdown",
            Self::StatusUpdate => "server:status_update",
        }
    }
}

impl fmt::Display for EventTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events dispatched by the host server.
///
/// # Examples
///
/// ```
/// use moonraker_feishu::event::{EventTopic, KlippyEvent};
/// use serde_json::json;
///
/// let started = KlippyEvent::Started("ready".to_string());
/// assert_eq!(started.topic(), EventTopic::KlippyStarted);
///
/// let update = KlippyEvent::status_update(json!({"print_stats": {"state": "printing"}}));
/// assert_eq!(update.unwrap().topic(), EventTopic::StatusUpdate);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum KlippyEvent {
    /// Klippy finished starting; carries its state label (`ready`,
    /// `startup`, `error`, ...).
    Started(String),

    /// Klippy shut down; carries the shutdown reason or state.
    Shutdown(String),

    /// Subscribed printer objects changed. Keys are object names
    /// (`webhooks`, `print_stats`, ...) mapped to the changed fields.
    StatusUpdate(Map<String, Value>),
}

impl KlippyEvent {
    /// Returns the topic this event is published on.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Started(_) => EventTopic::KlippyStarted,
            Self::Shutdown(_) => EventTopic::KlippyShutdown,
            Self::StatusUpdate(_) => EventTopic::StatusUpdate,
        }
    }

    /// Creates a status update from a JSON value.
    ///
    /// Returns `None` unless `value` is an object.
    #[must_use]
    pub fn status_update(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::StatusUpdate(map)),
            _ => None,
        }
    }
}
