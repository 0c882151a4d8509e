// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Moonraker Feishu - push Klipper print job notifications to a Feishu bot.
//!
//! This library runs inside a Moonraker-like host. It follows Klippy's
//! server events and posts a short text message to a Feishu custom bot
//! webhook when a print starts, completes, fails, is paused or cancelled,
//! or when the firmware shuts down.
//!
//! # Messages
//!
//! | transition        | message                        |
//! |-------------------|--------------------------------|
//! | print started     | `Printstart: \n<file>`         |
//! | print complete    | `Printed: \n<file> \n`         |
//! | print paused      | `Printing: \n<file> \n`        |
//! | print cancelled   | `Printed: \n<file> \n`         |
//! | print error       | Klippy's error message         |
//! | firmware shutdown | first line of the reason       |
//!
//! # Host integration
//!
//! The host provides its services through the traits in [`host`] and
//! publishes [`event::KlippyEvent`]s on an [`event::EventBus`]:
//!
//! ```no_run
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use moonraker_feishu::StatusNotifier;
//! use moonraker_feishu::event::{EventBus, KlippyEvent};
//! use moonraker_feishu::host::{KlippyApi, MemoryStore, StaticHost};
//!
//! # async fn example(klippy: impl KlippyApi) -> moonraker_feishu::Result<()> {
//! let section = HashMap::from([(
//!     "feishu_bot_secret".to_string(),
//!     "0123-abcd".to_string(),
//! )]);
//! let store = MemoryStore::new();
//! let host = Arc::new(StaticHost::new("voron"));
//! let bus = EventBus::new();
//!
//! let mut notifier = StatusNotifier::load(&section, &store, host, klippy, &bus).await?;
//!
//! bus.publish(KlippyEvent::Started("ready".to_string()));
//! drop(bus);
//!
//! // Returns once the bus is gone and every queued event was handled.
//! notifier.run().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `http` (default): [`protocol::HttpTransport`], based on `reqwest`

pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod message;
mod notifier;
pub mod protocol;
pub mod state;

pub use config::{ConfigSource, NotifierConfig};
pub use error::{
    ConfigError, Error, KlippyError, ParseError, ProtocolError, Result, StoreError,
};
pub use notifier::{PushOutcome, StatusNotifier};
