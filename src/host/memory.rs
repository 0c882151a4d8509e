// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host capabilities.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;

use super::{Host, KeyValueStore};
use crate::error::StoreError;

/// Key-value store backed by a `HashMap`.
///
/// # Examples
///
/// ```
/// use moonraker_feishu::host::MemoryStore;
/// use serde_json::json;
///
/// let store = MemoryStore::new()
///     .with_item("moonraker", "file_manager.gcode_path", json!("/home/pi/gcodes"))
///     .with_item("fluidd", "uiSettings.general.instanceName", json!("Voron"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<(String, String), Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item.
    #[must_use]
    pub fn with_item(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: Value,
    ) -> Self {
        self.items.insert((namespace.into(), key.into()), value);
        self
    }
}

impl KeyValueStore for MemoryStore {
    async fn get_item(&self, namespace: &str, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .items
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }
}

/// Host with a fixed hostname that records raised warnings.
#[derive(Debug, Default)]
pub struct StaticHost {
    hostname: String,
    warnings: Mutex<Vec<String>>,
}

impl StaticHost {
    /// Creates a host reporting `hostname`.
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            warnings: Mutex::new(Vec::new()),
        }
    }

    /// Returns the warnings raised so far, oldest first.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().clone()
    }
}

impl Host for StaticHost {
    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn add_warning(&self, warning: String) {
        tracing::warn!(warning = %warning, "Host warning raised");
        self.warnings.lock().push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_store_returns_inserted_items() {
        let store = MemoryStore::new().with_item("fluidd", "name", json!("Voron"));

        assert_eq!(
            store.get_item("fluidd", "name").await.unwrap(),
            Some(json!("Voron"))
        );
        assert_eq!(store.get_item("mainsail", "name").await.unwrap(), None);
    }

    #[test]
    fn static_host_records_warnings_in_order() {
        let host = StaticHost::new("printer");
        host.add_warning("first".to_string());
        host.add_warning("second".to_string());

        assert_eq!(host.hostname(), "printer");
        assert_eq!(host.warnings(), vec!["first", "second"]);
    }
}
