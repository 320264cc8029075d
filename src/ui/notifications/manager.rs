// SPDX-License-Identifier: MPL-2.0
//! Pending notification queue.

use super::notification::{Notification, Severity};

/// Notifications waiting for the host to pick them up, oldest first.
#[derive(Debug, Default)]
pub struct Manager {
    pending: Vec<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `notification` and logs it at a level matching its severity.
    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Warning => tracing::warn!(key = notification.message_key(), "notification"),
            Severity::Error => tracing::error!(key = notification.message_key(), "notification"),
            Severity::Success | Severity::Info => {
                tracing::debug!(key = notification.message_key(), "notification");
            }
        }
        self.pending.push(notification);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    /// Drops stale upload errors once an upload succeeds.
    pub fn clear_upload_errors(&mut self) {
        self.pending
            .retain(|n| !n.message_key().starts_with("error-upload-"));
    }
}
