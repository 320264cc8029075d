// SPDX-License-Identifier: MPL-2.0
//! User-facing outcome notifications.
//!
//! Commands report success and failure as [`Notification`]s carrying an i18n
//! key. The host resolves the key through [`crate::i18n`] and decides how to
//! display it; nothing here renders.

mod manager;
mod notification;

pub use manager::Manager;
pub use notification::{Notification, Severity};
