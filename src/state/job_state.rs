// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Print job state labels.

use std::fmt;

use serde_json::Value;

/// State label reported by Klippy for a print job or for the firmware.
///
/// Klippy owns these values; unknown labels are preserved as
/// [`JobState::Other`] instead of being rejected.
///
/// # Examples
///
/// ```
/// use moonraker_feishu::state::JobState;
///
/// assert_eq!(JobState::from("printing"), JobState::Printing);
/// assert_eq!(JobState::from("busy"), JobState::Other("busy".to_string()));
/// assert_eq!(JobState::Standby.as_str(), "standby");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobState {
    /// A print job is running.
    Printing,
    /// The last job finished successfully.
    Complete,
    /// The last job stopped on an error.
    Error,
    /// The running job is paused.
    Paused,
    /// No job is loaded; entered when a job is cancelled.
    Standby,
    /// The firmware shut down.
    Shutdown,
    /// Any other label.
    Other(String),
}

impl JobState {
    /// Returns the label as Klippy spells it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Printing => "printing",
            Self::Complete => "complete",
            Self::Error => "error",
            Self::Paused => "paused",
            Self::Standby => "standby",
            Self::Shutdown => "shutdown",
            Self::Other(raw) => raw,
        }
    }

    /// Reads a state from a JSON value.
    ///
    /// Non-string values are kept verbatim as [`JobState::Other`].
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::from(s.as_str()),
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<&str> for JobState {
    fn from(s: &str) -> Self {
        match s {
            "printing" => Self::Printing,
            "complete" => Self::Complete,
            "error" => Self::Error,
            "paused" => Self::Paused,
            "standby" => Self::Standby,
            "shutdown" => Self::Shutdown,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_labels_round_trip_through_as_str() {
        for label in [
            "printing", "complete", "error", "paused", "standby", "shutdown",
        ] {
            let state = JobState::from(label);
            assert!(!matches!(state, JobState::Other(_)), "{label}");
            assert_eq!(state.as_str(), label);
        }
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(
            JobState::from("Printing"),
            JobState::Other("Printing".to_string())
        );
    }

    #[test]
    fn from_value_keeps_non_strings() {
        assert_eq!(JobState::from_value(&json!("paused")), JobState::Paused);
        assert_eq!(
            JobState::from_value(&json!(null)),
            JobState::Other("null".to_string())
        );
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(JobState::Other("busy".to_string()).to_string(), "busy");
        assert_eq!(JobState::Complete.to_string(), "complete");
    }
}
