// SPDX-License-Identifier: MPL-2.0
//! Notification values reported back to the host.

use crate::error::{Error, ExportError, ImageError};

/// How an outcome should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    Error,
}

/// A user-facing outcome: a severity and an i18n key with arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Error notification describing `err`, with its details as arguments.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let notification = Self::error(err.i18n_key());
        match err {
            Error::Io(detail) | Error::Config(detail) => notification.with_arg("detail", detail),
            Error::Image(ImageError::InvalidFileType(kind)) => notification.with_arg("kind", kind),
            Error::Image(ImageError::FileTooLarge { size, limit }) => notification
                .with_arg("size_mb", format_megabytes(*size))
                .with_arg("limit_mb", format_megabytes(*limit)),
            Error::Image(ImageError::DecodeFailure(detail))
            | Error::Export(ExportError::EncodeFailure(detail)) => {
                notification.with_arg("detail", detail)
            }
            Error::Export(ExportError::InvalidSurface { width, height }) => notification
                .with_arg("width", width.to_string())
                .with_arg("height", height.to_string()),
            Error::Export(_) => notification,
        }
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_megabytes(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / (1024.0 * 1024.0))
}
