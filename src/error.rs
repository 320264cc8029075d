// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error types.
//!
//! Every failure a user can trigger (bad upload, failed export) is recoverable:
//! callers surface it through a notification and leave the session untouched.
//! Each user-facing variant carries an i18n key so the notification layer can
//! resolve a localized message.

use thiserror::Error;

/// Maximum accepted upload size (50 MB).
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Image Error: {0}")]
    Image(#[from] ImageError),

    #[error("Export Error: {0}")]
    Export(#[from] ExportError),
}

impl Error {
    /// Returns the i18n message key describing this error to the user.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Image(err) => err.i18n_key(),
            Error::Export(err) => err.i18n_key(),
        }
    }
}

/// Failures while accepting a user-supplied raster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// The upload is not an image (MIME type or content sniffing disagree).
    #[error("Not a supported image file: {0}")]
    InvalidFileType(String),

    /// The upload exceeds [`MAX_UPLOAD_BYTES`].
    #[error("File is too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    /// The bytes looked like an image but could not be decoded.
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),
}

impl ImageError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ImageError::InvalidFileType(_) => "error-upload-invalid-type",
            ImageError::FileTooLarge { .. } => "error-upload-too-large",
            ImageError::DecodeFailure(_) => "error-upload-decode",
        }
    }
}

/// Failures while producing the exported composite.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Neither a background nor a frame is loaded.
    #[error("Nothing to export")]
    NothingToExport,

    /// Another export is still running.
    #[error("An export is already in progress")]
    Busy,

    /// The requested surface could not be allocated (zero or oversized).
    #[error("Cannot allocate a {width}x{height} export surface")]
    InvalidSurface { width: u32, height: u32 },

    /// Encoding the surface produced no bytes or failed outright.
    #[error("Failed to encode exported image: {0}")]
    EncodeFailure(String),

    /// The background worker stopped before returning a result.
    #[error("Export task was cancelled")]
    Cancelled,
}

impl ExportError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ExportError::NothingToExport => "error-export-nothing",
            ExportError::Busy => "error-export-busy",
            ExportError::InvalidSurface { .. } => "error-export-surface",
            ExportError::EncodeFailure(_) => "error-export-encode",
            ExportError::Cancelled => "error-export-cancelled",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
