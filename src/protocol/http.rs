// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP webhook transport.

use std::time::Duration;

use reqwest::Client;

use crate::config::NotifierConfig;
use crate::error::ProtocolError;
use crate::protocol::{TextMessage, WebhookResponse, WebhookTransport};

/// HTTP transport for posting bot messages.
///
/// Every request is bounded by the configured timeout so a stalled endpoint
/// cannot hold up event handling indefinitely.
///
/// # Examples
///
/// ```no_run
/// use moonraker_feishu::NotifierConfig;
/// use moonraker_feishu::protocol::{HttpTransport, TextMessage, WebhookTransport};
///
/// # async fn example() -> moonraker_feishu::Result<()> {
/// let config = NotifierConfig::new("my-secret");
/// let transport = HttpTransport::from_config(&config)?;
/// let reply = transport
///     .post_message(&config.webhook_url(), &TextMessage::new("hello"))
///     .await?;
/// assert!(reply.is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, ProtocolError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self { client, timeout })
    }

    /// Creates a transport using the timeout from `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &NotifierConfig) -> Result<Self, ProtocolError> {
        Self::new(config.timeout())
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else {
            ProtocolError::Http(err)
        }
    }
}

impl WebhookTransport for HttpTransport {
    async fn post_message(
        &self,
        url: &str,
        message: &TextMessage,
    ) -> crate::Result<WebhookResponse> {
        tracing::debug!(text = %message.text(), "Posting webhook message");

        let response = self
            .client
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        tracing::debug!(status = status.as_u16(), body = %body, "Received webhook response");

        match WebhookResponse::parse(&body) {
            Ok(reply) => Ok(reply),
            Err(_) if !status.is_success() => Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ))
            .into()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_timeout() {
        let transport = HttpTransport::new(Duration::from_secs(3)).unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn from_config_uses_configured_timeout() {
        let config = NotifierConfig::new("secret").with_timeout(Duration::from_secs(7));
        let transport = HttpTransport::from_config(&config).unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(7));
    }
}
