// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plugin configuration.
//!
//! The host hands the notifier its configuration section through the
//! [`ConfigSource`] trait. [`NotifierConfig`] reads the options it needs from
//! that section and validates them once, at construction time.
//!
//! # Options
//!
//! | option              | required | default                                          |
//! |---------------------|----------|--------------------------------------------------|
//! | `feishu_bot_secret` | yes      |                                                  |
//! | `webhook_url`       | no       | `https://open.feishu.cn/open-apis/bot/v2/hook/`  |
//! | `request_timeout`   | no       | `10` (seconds)                                   |

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::error::ConfigError;

/// Read access to a plugin configuration section.
pub trait ConfigSource {
    /// Returns the raw value of `key`, or `None` if the option is not set.
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Validated notifier configuration.
///
/// # Examples
///
/// ```
/// use moonraker_feishu::NotifierConfig;
/// use std::time::Duration;
///
/// let config = NotifierConfig::new("0123-abcd")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(
///     config.webhook_url(),
///     "https://open.feishu.cn/open-apis/bot/v2/hook/0123-abcd"
/// );
/// ```
#[derive(Clone)]
pub struct NotifierConfig {
    secret: String,
    webhook_base: String,
    timeout: Duration,
}

impl NotifierConfig {
    /// Option holding the bot secret.
    pub const SECRET_OPTION: &'static str = "feishu_bot_secret";
    /// Option overriding the webhook base URL.
    pub const WEBHOOK_URL_OPTION: &'static str = "webhook_url";
    /// Option overriding the request timeout, in seconds.
    pub const TIMEOUT_OPTION: &'static str = "request_timeout";
    /// Default Feishu custom bot endpoint; the secret is appended to it.
    pub const DEFAULT_WEBHOOK_BASE: &'static str = "https://open.feishu.cn/open-apis/bot/v2/hook/";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given bot secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            webhook_base: Self::DEFAULT_WEBHOOK_BASE.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Reads and validates the configuration from a host config section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] if the secret is absent or
    /// blank, and [`ConfigError::InvalidValue`] if an optional setting cannot
    /// be parsed.
    pub fn from_source(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let secret = source
            .get(Self::SECRET_OPTION)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingOption(Self::SECRET_OPTION.to_string()))?;

        let mut config = Self::new(secret);

        if let Some(url) = source.get(Self::WEBHOOK_URL_OPTION) {
            config = config.with_webhook_base(url.trim())?;
        }

        if let Some(raw) = source.get(Self::TIMEOUT_OPTION) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                option: Self::TIMEOUT_OPTION.to_string(),
                message: format!("expected whole seconds, got {raw:?}"),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    option: Self::TIMEOUT_OPTION.to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Sets the webhook base URL the secret is appended to.
    ///
    /// A trailing `/` is added when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] unless the URL is `http(s)://`.
    pub fn with_webhook_base(mut self, base: impl Into<String>) -> Result<Self, ConfigError> {
        let mut base = base.into();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                option: Self::WEBHOOK_URL_OPTION.to_string(),
                message: format!("{base:?} is not an http(s) URL"),
            });
        }
        if !base.ends_with('/') {
            base.push('/');
        }
        self.webhook_base = base;
        Ok(self)
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the bot secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the webhook base URL, without the secret.
    #[must_use]
    pub fn webhook_base(&self) -> &str {
        &self.webhook_base
    }

    /// Builds the full webhook URL, with the secret as last path segment.
    #[must_use]
    pub fn webhook_url(&self) -> String {
        format!("{}{}", self.webhook_base, urlencoding::encode(&self.secret))
    }
}

// The secret must not end up in logs.
impl std::fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("secret", &"<redacted>")
            .field("webhook_base", &self.webhook_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn from_source_reads_secret_with_defaults() {
        let config = NotifierConfig::from_source(&section(&[("feishu_bot_secret", "abc")])).unwrap();
        assert_eq!(config.secret(), "abc");
        assert_eq!(config.webhook_base(), NotifierConfig::DEFAULT_WEBHOOK_BASE);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn missing_secret_is_rejected() {
        let err = NotifierConfig::from_source(&section(&[])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingOption("feishu_bot_secret".to_string())
        );
    }

    #[test]
    fn blank_secret_is_rejected() {
        let err = NotifierConfig::from_source(&section(&[("feishu_bot_secret", "  ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingOption(_)));
    }

    #[test]
    fn timeout_option_is_parsed() {
        let config = NotifierConfig::from_source(&section(&[
            ("feishu_bot_secret", "abc"),
            ("request_timeout", "5"),
        ]))
        .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        for raw in ["soon", "0", "-3"] {
            let err = NotifierConfig::from_source(&section(&[
                ("feishu_bot_secret", "abc"),
                ("request_timeout", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }), "{raw}");
        }
    }

    #[test]
    fn webhook_url_override_gets_trailing_slash() {
        let config = NotifierConfig::from_source(&section(&[
            ("feishu_bot_secret", "abc"),
            ("webhook_url", "http://127.0.0.1:8080/hook"),
        ]))
        .unwrap();
        assert_eq!(config.webhook_url(), "http://127.0.0.1:8080/hook/abc");
    }

    #[test]
    fn webhook_url_must_be_http() {
        let err = NotifierConfig::new("abc")
            .with_webhook_base("ftp://example.com/")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn secret_is_percent_encoded_in_url() {
        let config = NotifierConfig::new("a b/c");
        assert_eq!(
            config.webhook_url(),
            "https://open.feishu.cn/open-apis/bot/v2/hook/a%20b%2Fc"
        );
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", NotifierConfig::new("top-secret"));
        assert!(!rendered.contains("top-secret"));
    }

    #[test]
    fn btree_map_is_a_config_source() {
        let mut map = BTreeMap::new();
        map.insert("feishu_bot_secret".to_string(), "xyz".to_string());
        assert_eq!(NotifierConfig::from_source(&map).unwrap().secret(), "xyz");
    }
}
