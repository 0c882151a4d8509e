// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The status notifier component.
//!
//! [`StatusNotifier`] follows Klippy's job state through the host's server
//! events and posts a chat message when a job starts, finishes, fails, is
//! paused or cancelled, or when the firmware shuts down.
//!
//! All handlers take `&mut self` and are driven one event at a time by
//! [`StatusNotifier::run`], so the cached print stats are only ever touched
//! by one handler at a time. Handler failures are logged and never returned.

use serde_json::{Map, Value};

use crate::config::{ConfigSource, NotifierConfig};
use crate::error::{Result, StoreError};
use crate::event::{EventBus, EventSubscription, EventTopic, KlippyEvent};
use crate::host::{Host, KeyValueStore, KlippyApi};
use crate::message::Notification;
use crate::protocol::{TextMessage, WebhookTransport};
use crate::state::{JobState, PrintStats};

/// Store location of the gcode directory.
const GCODE_PATH_ITEM: (&str, &str) = ("moonraker", "file_manager.gcode_path");

/// Store locations of the instance display name, in lookup order.
const INSTANCE_NAME_ITEMS: [(&str, &str); 2] = [
    ("fluidd", "uiSettings.general.instanceName"),
    ("mainsail", "uiSettings.general.instanceName"),
];

/// Result of one push attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// The bot accepted the message.
    Delivered,
    /// The bot answered with an error; a host warning was raised.
    Rejected {
        /// The `code` field of the reply.
        code: String,
        /// The `msg` field of the reply.
        msg: String,
    },
    /// The request failed before a reply was decoded.
    Failed(String),
    /// The state has no message; nothing was sent.
    UnsupportedState(JobState),
}

impl PushOutcome {
    /// Returns `true` if the message was delivered.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Pushes print job state changes to a Feishu bot.
///
/// # Examples
///
/// ```no_run
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// use moonraker_feishu::StatusNotifier;
/// use moonraker_feishu::event::EventBus;
/// use moonraker_feishu::host::{KlippyApi, MemoryStore, StaticHost};
///
/// # async fn example(klippy: impl KlippyApi) -> moonraker_feishu::Result<()> {
/// let mut section = HashMap::new();
/// section.insert("feishu_bot_secret".to_string(), "my-secret".to_string());
///
/// let bus = EventBus::new();
/// let host = Arc::new(StaticHost::new("voron"));
/// let mut notifier =
///     StatusNotifier::load(&section, &MemoryStore::new(), host, klippy, &bus).await?;
///
/// // Handles events until the bus is dropped.
/// notifier.run().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StatusNotifier<H, K, T> {
    config: NotifierConfig,
    host: H,
    klippy: K,
    transport: T,
    subscription: EventSubscription,
    last_print_stats: PrintStats,
    gcode_path: String,
    print_name: String,
}

impl<H, K, T> StatusNotifier<H, K, T>
where
    H: Host,
    K: KlippyApi,
    T: WebhookTransport,
{
    /// Topics the notifier subscribes to.
    pub const TOPICS: [EventTopic; 3] = [
        EventTopic::KlippyStarted,
        EventTopic::KlippyShutdown,
        EventTopic::StatusUpdate,
    ];

    /// Creates a notifier from the host's config section.
    ///
    /// Reads the store, then subscribes to [`Self::TOPICS`] on `bus`. No
    /// request is sent until the first event arrives.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the secret is missing and `Error::Store`
    /// if the store cannot be read.
    pub async fn new(
        source: &impl ConfigSource,
        store: &impl KeyValueStore,
        host: H,
        klippy: K,
        transport: T,
        bus: &EventBus,
    ) -> Result<Self> {
        let config = NotifierConfig::from_source(source)?;
        Self::with_config(config, store, host, klippy, transport, bus).await
    }

    /// Creates a notifier from an already validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the store cannot be read.
    pub async fn with_config(
        config: NotifierConfig,
        store: &impl KeyValueStore,
        host: H,
        klippy: K,
        transport: T,
        bus: &EventBus,
    ) -> Result<Self> {
        let (namespace, key) = GCODE_PATH_ITEM;
        let gcode_path = store
            .get_item(namespace, key)
            .await?
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let print_name = resolve_print_name(store, &host).await?;

        tracing::info!(
            print_name = %print_name,
            gcode_path = %gcode_path,
            "Feishu notifier loaded"
        );

        Ok(Self {
            config,
            host,
            klippy,
            transport,
            subscription: bus.subscribe(&Self::TOPICS),
            last_print_stats: PrintStats::new(),
            gcode_path,
            print_name,
        })
    }

    /// Handles events until the bus is dropped.
    pub async fn run(&mut self) {
        while let Some(event) = self.subscription.next().await {
            self.handle_event(event).await;
        }
        tracing::debug!("Event bus closed, notifier stopped");
    }

    /// Dispatches one event to its handler.
    ///
    /// Returns the push outcome if the event triggered a message.
    pub async fn handle_event(&mut self, event: KlippyEvent) -> Option<PushOutcome> {
        match event {
            KlippyEvent::Started(state) => {
                self.handle_started(&state).await;
                None
            }
            KlippyEvent::Shutdown(state) => {
                self.handle_shutdown(&state);
                None
            }
            KlippyEvent::StatusUpdate(data) => self.status_update(&data).await,
        }
    }

    /// Reloads the print stats once Klippy reports `ready`.
    ///
    /// Other states are ignored. The query result replaces the cached
    /// stats; a failed query leaves them empty.
    pub async fn handle_started(&mut self, state: &str) {
        if state != "ready" {
            return;
        }

        let mut objects = Map::new();
        objects.insert("print_stats".to_string(), Value::Null);

        let fields = match self.klippy.subscribe_objects(&objects).await {
            Ok(mut result) => match result.remove("print_stats") {
                Some(Value::Object(fields)) => fields,
                _ => Map::new(),
            },
            Err(err) => {
                tracing::warn!(error = %err, "Error subscribing to print_stats");
                Map::new()
            }
        };
        self.last_print_stats.replace(fields);

        if let Some(state) = self.last_print_stats.state() {
            tracing::info!(state = %state, "Job state initialized");
        }
    }

    /// Logs a Klippy shutdown.
    ///
    /// The chat message for a shutdown is sent from the `webhooks` status
    /// update instead, which carries the full reason.
    pub fn handle_shutdown(&self, state: &str) {
        tracing::info!(state = %state, "Klippy shutdown");
    }

    /// Handles a status update from Klippy.
    ///
    /// A `webhooks` section takes precedence: only a `shutdown` state is
    /// pushed, and `print_stats` in the same update is ignored. Otherwise a
    /// `print_stats` section carrying a `state` is pushed if the state has a
    /// message, then merged into the cached stats.
    pub async fn status_update(&mut self, data: &Map<String, Value>) -> Option<PushOutcome> {
        if let Some(webhooks) = data.get("webhooks") {
            let state = webhooks
                .get("state")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let message = webhooks
                .get("state_message")
                .and_then(Value::as_str)
                .unwrap_or_default();
            tracing::info!(state, "Klippy status");
            tracing::info!(message, "Klippy state message");

            if JobState::from(state) == JobState::Shutdown {
                return Some(self.push_state(&JobState::Shutdown, Some(message), None).await);
            }
            return None;
        }

        let update = data.get("print_stats")?.as_object()?;
        let state = JobState::from_value(update.get("state")?);
        let view = self.last_print_stats.overlaid(update);

        let outcome = match state {
            JobState::Printing | JobState::Complete | JobState::Paused | JobState::Standby => {
                Some(self.push_state(&state, None, view.filename()).await)
            }
            JobState::Error => Some(self.push_state(&state, view.message(), None).await),
            JobState::Shutdown | JobState::Other(_) => {
                tracing::debug!(state = %state, data = ?data, "Unhandled job state");
                None
            }
        };

        self.last_print_stats.merge(update);
        outcome
    }

    /// Posts the message for `state` to the bot.
    ///
    /// A rejection raises a host warning that stays until restart; transport
    /// failures are only logged.
    pub async fn push_state(
        &self,
        state: &JobState,
        text: Option<&str>,
        filename: Option<&str>,
    ) -> PushOutcome {
        let Some(notification) = Notification::compose(state, text, filename) else {
            tracing::error!(state = %state, "Unknown state, nothing to push");
            return PushOutcome::UnsupportedState(state.clone());
        };

        tracing::debug!(
            title = notification.title(),
            printer = %self.print_name,
            "Pushing notification"
        );

        let message = TextMessage::new(notification.digest());
        match self
            .transport
            .post_message(&self.config.webhook_url(), &message)
            .await
        {
            Ok(reply) if reply.is_success() => {
                tracing::info!("Message pushed successfully");
                PushOutcome::Delivered
            }
            Ok(reply) => {
                let code = reply.error_code();
                let msg = reply.error_message().to_string();
                self.host.add_warning(format!(
                    "[push_feishu] Failed to push message. ErrCode:{code},ErrMsg:{msg}. \
                     Restart Moonraker to clear this warning."
                ));
                tracing::error!("Failed to push message. ErrCode:{code},ErrMsg:{msg}");
                PushOutcome::Rejected { code, msg }
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to push message");
                PushOutcome::Failed(err.to_string())
            }
        }
    }
}

impl<H, K, T> StatusNotifier<H, K, T> {
    /// Returns the cached print stats.
    #[must_use]
    pub fn last_print_stats(&self) -> &PrintStats {
        &self.last_print_stats
    }

    /// Returns the gcode directory read from the store, or `""`.
    #[must_use]
    pub fn gcode_path(&self) -> &str {
        &self.gcode_path
    }

    /// Returns the instance display name.
    #[must_use]
    pub fn print_name(&self) -> &str {
        &self.print_name
    }

    /// Returns the notifier configuration.
    #[must_use]
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Returns the topics the notifier is subscribed to.
    #[must_use]
    pub fn topics(&self) -> &[EventTopic] {
        self.subscription.topics()
    }
}

#[cfg(feature = "http")]
impl<H, K> StatusNotifier<H, K, crate::protocol::HttpTransport>
where
    H: Host,
    K: KlippyApi,
{
    /// Creates a notifier that posts over HTTP.
    ///
    /// The transport timeout comes from the `request_timeout` option.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid,
    /// `Error::Protocol` if the HTTP client cannot be built and
    /// `Error::Store` if the store cannot be read.
    pub async fn load(
        source: &impl ConfigSource,
        store: &impl KeyValueStore,
        host: H,
        klippy: K,
        bus: &EventBus,
    ) -> Result<Self> {
        let config = NotifierConfig::from_source(source)?;
        let transport = crate::protocol::HttpTransport::from_config(&config)?;
        Self::with_config(config, store, host, klippy, transport, bus).await
    }
}

/// Returns the first instance name set in the store, else the hostname.
async fn resolve_print_name(
    store: &impl KeyValueStore,
    host: &impl Host,
) -> std::result::Result<String, StoreError> {
    for (namespace, key) in INSTANCE_NAME_ITEMS {
        let item = store.get_item(namespace, key).await?;
        if let Some(name) = item.as_ref().and_then(Value::as_str)
            && !name.is_empty()
        {
            return Ok(name.to_string());
        }
    }
    Ok(host.hostname())
}
