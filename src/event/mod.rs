// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed server events.
//!
//! The host publishes [`KlippyEvent`]s on an [`EventBus`]. Consumers
//! subscribe to a set of [`EventTopic`]s and receive matching events, in
//! publication order, through an [`EventSubscription`].
//!
//! # Examples
//!
//! ```
//! use moonraker_feishu::event::{EventBus, EventTopic, KlippyEvent};
//!
//! let bus = EventBus::new();
//! let _sub = bus.subscribe(&[EventTopic::KlippyStarted]);
//!
//! bus.publish(KlippyEvent::Started("ready".to_string()));
//! ```

mod event_bus;
mod klippy_event;

pub use event_bus::{EventBus, EventSubscription};
pub use klippy_event::{EventTopic, KlippyEvent};
