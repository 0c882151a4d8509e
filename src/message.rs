// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Chat message composition.

use crate::state::JobState;

/// A chat notification for a job state transition.
///
/// Only [`digest`](Self::digest) is sent to the bot; the title is kept for
/// logging.
///
/// # Examples
///
/// ```
/// use moonraker_feishu::message::Notification;
/// use moonraker_feishu::state::JobState;
///
/// let note = Notification::compose(&JobState::Printing, None, Some("bench.gcode")).unwrap();
/// assert_eq!(note.digest(), "Printstart: \nbench.gcode");
///
/// assert!(Notification::compose(&JobState::Other("busy".into()), None, None).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    state: JobState,
    title: &'static str,
    digest: String,
}

impl Notification {
    /// Builds the notification for `state`.
    ///
    /// `text` is used by `shutdown` and `error`, `filename` by the job
    /// transitions; a missing value renders as an empty string. Returns
    /// `None` for states that have no message.
    #[must_use]
    pub fn compose(state: &JobState, text: Option<&str>, filename: Option<&str>) -> Option<Self> {
        let text = text.unwrap_or_default();
        let filename = filename.unwrap_or_default();

        let (title, digest) = match state {
            // Klippy shutdown messages carry a long help text after the
            // first line.
            JobState::Shutdown => (
                "Shutdown",
                text.split('\n').next().unwrap_or_default().to_string(),
            ),
            JobState::Printing => ("Print started", format!("Printstart: \n{filename}")),
            JobState::Complete => ("Print finished", format!("Printed: \n{filename} \n")),
            JobState::Error => ("Error", text.to_string()),
            JobState::Paused => ("Print paused", format!("Printing: \n{filename} \n")),
            JobState::Standby => ("Print cancelled", format!("Printed: \n{filename} \n")),
            JobState::Other(_) => return None,
        };

        Some(Self {
            state: state.clone(),
            title,
            digest,
        })
    }

    /// Returns the state this notification reports.
    #[must_use]
    pub fn state(&self) -> &JobState {
        &self.state
    }

    /// Returns a short title for the transition.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Returns the text sent to the chat.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }
}
