// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Notification keys and error keys resolve to localized text through the
//! Fluent localization system.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Embedded `.ftl` translation files
//! - Message arguments for interpolated values
//! - Fallback to `en-US` when a locale or message is missing

pub mod fluent;

pub use fluent::I18n;
