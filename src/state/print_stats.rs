// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached `print_stats` snapshot.

use serde_json::{Map, Value};

use super::JobState;

/// Last known contents of Klippy's `print_stats` object.
///
/// Klippy only sends the fields that changed, so the snapshot is built up by
/// merging partial updates: fields in the update overwrite, fields absent
/// from it are kept.
///
/// # Examples
///
/// ```
/// use moonraker_feishu::state::{JobState, PrintStats};
/// use serde_json::json;
///
/// let mut stats = PrintStats::new();
/// stats.merge(json!({"state": "printing", "filename": "cube.gcode"}).as_object().unwrap());
/// stats.merge(json!({"state": "complete"}).as_object().unwrap());
///
/// assert_eq!(stats.state(), Some(JobState::Complete));
/// assert_eq!(stats.filename(), Some("cube.gcode"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrintStats {
    fields: Map<String, Value>,
}

impl PrintStats {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a partial update into the snapshot.
    pub fn merge(&mut self, update: &Map<String, Value>) {
        for (key, value) in update {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Replaces the whole snapshot.
    pub fn replace(&mut self, fields: Map<String, Value>) {
        self.fields = fields;
    }

    /// Returns a copy of the snapshot with `update` merged in, leaving
    /// `self` untouched.
    #[must_use]
    pub fn overlaid(&self, update: &Map<String, Value>) -> Self {
        let mut view = self.clone();
        view.merge(update);
        view
    }

    /// Returns a raw field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the job state, if known.
    #[must_use]
    pub fn state(&self) -> Option<JobState> {
        self.fields.get("state").map(JobState::from_value)
    }

    /// Returns the file of the current or last job.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.fields.get("filename").and_then(Value::as_str)
    }

    /// Returns Klippy's status message (set on errors).
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").and_then(Value::as_str)
    }

    /// Returns `true` if nothing is known yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns all known fields.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for PrintStats {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn merge_is_right_biased_and_keeps_absent_keys() {
        let mut stats = PrintStats::new();
        stats.merge(&obj(json!({"state": "printing", "filename": "a.gcode", "print_duration": 1.0})));
        stats.merge(&obj(json!({"print_duration": 2.5})));
        stats.merge(&obj(json!({"state": "paused"})));

        assert_eq!(
            stats.as_map(),
            &obj(json!({"state": "paused", "filename": "a.gcode", "print_duration": 2.5}))
        );
    }

    #[test]
    fn replace_drops_previous_fields() {
        let mut stats = PrintStats::from(obj(json!({"state": "printing", "filename": "a.gcode"})));
        stats.replace(obj(json!({"state": "standby"})));

        assert_eq!(stats.filename(), None);
        assert_eq!(stats.state(), Some(JobState::Standby));
    }

    #[test]
    fn overlaid_does_not_mutate() {
        let stats = PrintStats::from(obj(json!({"filename": "a.gcode"})));
        let view = stats.overlaid(&obj(json!({"state": "complete"})));

        assert_eq!(view.state(), Some(JobState::Complete));
        assert_eq!(view.filename(), Some("a.gcode"));
        assert_eq!(stats.state(), None);
    }

    #[test]
    fn typed_getters_ignore_wrong_types() {
        let stats = PrintStats::from(obj(json!({"filename": 3, "message": null})));
        assert_eq!(stats.filename(), None);
        assert_eq!(stats.message(), None);
        assert!(!stats.is_empty());
        assert_eq!(stats.get("filename"), Some(&json!(3)));
    }
}
