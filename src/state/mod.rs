// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Print job state tracking.
//!
//! [`PrintStats`] caches the last known contents of Klippy's `print_stats`
//! object. [`JobState`] is the state label carried inside it and inside
//! `webhooks` updates.
//!
//! # Examples
//!
//! ```
//! use moonraker_feishu::state::{JobState, PrintStats};
//! use serde_json::json;
//!
//! let mut stats = PrintStats::new();
//! stats.merge(json!({"state": "printing"}).as_object().unwrap());
//!
//! assert_eq!(stats.state(), Some(JobState::Printing));
//! ```

mod job_state;
mod print_stats;

pub use job_state::JobState;
pub use print_stats::PrintStats;
