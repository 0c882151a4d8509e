// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feishu custom bot webhook protocol.
//!
//! A message is one JSON `POST` to `<webhook base>/<secret>`:
//!
//! ```text
//! {"msg_type": "text", "content": {"text": "<digest>"}}
//! ```
//!
//! The bot answers with a JSON object whose `StatusCode` is `0` on success.
//! Rejections carry `code` and `msg` instead.
//!
//! # Transports
//!
//! - [`HttpTransport`]: `reqwest` based transport (feature `http`)
//!
//! Any type implementing [`WebhookTransport`] can stand in for it.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpTransport;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;

/// Text message body accepted by the bot.
///
/// # Examples
///
/// ```
/// use moonraker_feishu::protocol::TextMessage;
///
/// let body = serde_json::to_string(&TextMessage::new("Printed: \ncube.gcode \n")).unwrap();
/// assert_eq!(
///     body,
///     r#"{"msg_type":"text","content":{"text":"Printed: \ncube.gcode \n"}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMessage {
    msg_type: &'static str,
    content: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TextContent {
    text: String,
}

impl TextMessage {
    /// Creates a plain text message.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            msg_type: "text",
            content: TextContent { text: text.into() },
        }
    }

    /// Returns the message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.content.text
    }
}

/// Bot reply to a posted message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WebhookResponse {
    #[serde(rename = "StatusCode", default)]
    status_code: Option<i64>,
    #[serde(rename = "StatusMessage", default)]
    status_message: Option<String>,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    msg: Option<String>,
}

impl WebhookResponse {
    /// Parses a reply body.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the body is not a JSON object.
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(ParseError::UnexpectedFormat(format!(
                "expected a JSON object, got {value}"
            )));
        }
        serde_json::from_value(value).map_err(Into::into)
    }

    /// Returns `true` if the bot accepted the message.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code == Some(0)
    }

    /// Returns the `StatusCode` field.
    #[must_use]
    pub fn status_code(&self) -> Option<i64> {
        self.status_code
    }

    /// Returns the `code` field rendered as text, or `unknown` if absent.
    #[must_use]
    pub fn error_code(&self) -> String {
        match &self.code {
            Some(Value::String(code)) => code.clone(),
            Some(code) => code.to_string(),
            None => "unknown".to_string(),
        }
    }

    /// Returns the `msg` field, falling back to `StatusMessage`.
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.msg
            .as_deref()
            .or(self.status_message.as_deref())
            .unwrap_or_default()
    }
}

/// Sends messages to a webhook URL.
#[allow(async_fn_in_trait)]
pub trait WebhookTransport {
    /// Posts `message` to `url` and returns the decoded reply.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request cannot be completed and
    /// `Error::Parse` if the reply is not understood.
    async fn post_message(
        &self,
        url: &str,
        message: &TextMessage,
    ) -> crate::Result<WebhookResponse>;
}
