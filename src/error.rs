// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the notifier.
//!
//! Construction failures (configuration, key-value store) surface as
//! [`Error`]. Failures that happen while reacting to events (Klippy queries,
//! webhook delivery) are logged and swallowed by the notifier, but the
//! capability traits still report them through these types.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Plugin configuration is missing or invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The host's key-value store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A Klippy API request failed.
    #[error("klippy error: {0}")]
    Klippy(#[from] KlippyError),

    /// Error occurred during HTTP communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to the plugin configuration section.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required option is absent or empty.
    #[error("missing required option: {0}")]
    MissingOption(String),

    /// An option is present but cannot be used.
    #[error("invalid value for {option}: {message}")]
    InvalidValue {
        /// The option name.
        option: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// Errors reported by a [`KeyValueStore`](crate::host::KeyValueStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The database component is not available.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// A lookup failed inside the store.
    #[error("lookup of {namespace}/{key} failed: {message}")]
    Lookup {
        /// The namespace that was queried.
        namespace: String,
        /// The key that was queried.
        key: String,
        /// Backend failure description.
        message: String,
    },
}

/// Errors reported by a [`KlippyApi`](crate::host::KlippyApi).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KlippyError {
    /// Klippy is not connected to the host.
    #[error("klippy is not connected")]
    NotConnected,

    /// Klippy answered the request with an error.
    #[error("request failed: {0}")]
    Request(String),
}

/// Errors related to HTTP communication with the webhook.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-JSON error page.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),
}

/// Errors related to parsing webhook responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::MissingOption("feishu_bot_secret".to_string());
        assert_eq!(
            err.to_string(),
            "missing required option: feishu_bot_secret"
        );
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::MissingOption("x".to_string()).into();
        assert!(matches!(err, Error::Config(ConfigError::MissingOption(_))));
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::Lookup {
            namespace: "fluidd".to_string(),
            key: "uiSettings.general.instanceName".to_string(),
            message: "locked".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "lookup of fluidd/uiSettings.general.instanceName failed: locked"
        );
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::Timeout(10_000);
        assert_eq!(err.to_string(), "request timed out after 10000 ms");
    }
}
