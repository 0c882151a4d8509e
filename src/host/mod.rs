// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capabilities the host server provides to the notifier.
//!
//! The notifier never looks components up by name. Everything it needs from
//! the host is passed in at construction as one of these traits:
//!
//! - [`Host`]: hostname and the operator-visible warning surface
//! - [`KeyValueStore`]: the persistent database, read once at startup
//! - [`KlippyApi`]: object queries against the Klippy firmware host
//!
//! [`MemoryStore`] and [`StaticHost`] are in-memory implementations usable for
//! embedding and tests.

mod memory;

pub use memory::{MemoryStore, StaticHost};

use serde_json::{Map, Value};

use crate::error::{KlippyError, StoreError};

/// Server-level services.
pub trait Host {
    /// Returns the hostname reported by the host machine.
    fn hostname(&self) -> String;

    /// Raises a warning on the operator interface.
    ///
    /// Warnings stay visible until the host process restarts.
    fn add_warning(&self, warning: String);
}

/// Read access to the host's persistent key-value database.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Looks up `key` in `namespace`.
    ///
    /// Keys may be dotted paths into a nested document
    /// (`uiSettings.general.instanceName`).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot answer. A key that simply
    /// does not exist is `Ok(None)`.
    async fn get_item(&self, namespace: &str, key: &str) -> Result<Option<Value>, StoreError>;
}

/// Object queries against Klippy.
#[allow(async_fn_in_trait)]
pub trait KlippyApi {
    /// Subscribes to printer objects and returns their current status.
    ///
    /// `objects` maps object names to a field list, `null` meaning all
    /// fields. The result maps each object name to its status object.
    ///
    /// # Errors
    ///
    /// Returns `KlippyError` if Klippy is unreachable or rejects the request.
    async fn subscribe_objects(
        &self,
        objects: &Map<String, Value>,
    ) -> Result<Map<String, Value>, KlippyError>;
}

impl<T: Host + ?Sized> Host for &T {
    fn hostname(&self) -> String {
        (**self).hostname()
    }

    fn add_warning(&self, warning: String) {
        (**self).add_warning(warning);
    }
}

impl<T: Host + ?Sized> Host for std::sync::Arc<T> {
    fn hostname(&self) -> String {
        (**self).hostname()
    }

    fn add_warning(&self, warning: String) {
        (**self).add_warning(warning);
    }
}
