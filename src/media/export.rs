// SPDX-License-Identifier: MPL-2.0
//! Composite export.
//!
//! Renders a scene at a target size, encodes it, and hands back an
//! [`ExportedImage`] for the download collaborator. Heavy exports can run on
//! an [`ExportWorker`], which allows a single export in flight.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tiny_skia::Pixmap;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::domain::editing::CanvasSize;
use crate::error::{ExportError, Result};
use crate::media::compositor::{render_export, Scene};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// PNG format (lossless, keeps transparency).
    #[default]
    Png,
}

impl ExportFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
        }
    }

    /// Returns the MIME type for this format.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
        }
    }

    /// Detects format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<ExportFormat> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            _ => None,
        }
    }
}

/// An encoded composite ready to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ExportFormat,
}

impl ExportedImage {
    /// Encodes a rendered surface as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EncodeFailure`] if encoding fails or yields no bytes.
    pub fn encode_png(surface: &Pixmap) -> std::result::Result<Self, ExportError> {
        let bytes = surface
            .encode_png()
            .map_err(|e| ExportError::EncodeFailure(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ExportError::EncodeFailure("encoder produced no data".into()));
        }
        Ok(Self {
            bytes,
            width: surface.width(),
            height: surface.height(),
            format: ExportFormat::Png,
        })
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Suggested download name, e.g. `framed_photo_1920x960.png`.
    #[must_use]
    pub fn suggested_filename(&self, prefix: &str) -> String {
        generate_default_filename(prefix, self.width, self.height, self.format)
    }

    /// Writes the encoded bytes to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), &self.bytes)?;
        tracing::info!(path = %path.as_ref().display(), bytes = self.bytes.len(), "export written");
        Ok(())
    }
}

/// Builds `{prefix}_{width}x{height}.{ext}`.
#[must_use]
pub fn generate_default_filename(
    prefix: &str,
    width: u32,
    height: u32,
    format: ExportFormat,
) -> String {
    format!("{prefix}_{width}x{height}.{}", format.extension())
}

/// Renders and encodes `scene` at `target` size.
///
/// # Errors
///
/// Returns [`ExportError::NothingToExport`] when the scene has no images,
/// or a surface/encoding error.
pub fn export_scene(
    scene: &Scene,
    target: CanvasSize,
) -> std::result::Result<ExportedImage, ExportError> {
    if scene.background.is_none() && scene.frame.is_none() {
        return Err(ExportError::NothingToExport);
    }
    let surface = render_export(scene, target)?;
    ExportedImage::encode_png(&surface)
}

// =============================================================================
// Background worker
// =============================================================================

/// Releases the worker slot when dropped, including during unwinding.
#[derive(Debug)]
struct SlotGuard(Arc<AtomicBool>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs exports on Tokio's blocking pool, one at a time.
///
/// A request made while another export is running fails with
/// [`ExportError::Busy`]; it is never queued.
#[derive(Debug, Clone)]
pub struct ExportWorker {
    runtime: Handle,
    in_flight: Arc<AtomicBool>,
}

impl ExportWorker {
    /// Creates a worker that spawns onto `runtime`.
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a worker on the runtime of the calling context, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Returns true while an export is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn try_acquire(&self) -> Option<SlotGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SlotGuard(Arc::clone(&self.in_flight)))
    }

    /// Starts exporting `scene` at `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Busy`] if an export is already running.
    pub fn submit(
        &self,
        scene: Scene,
        target: CanvasSize,
    ) -> std::result::Result<ExportTicket, ExportError> {
        let Some(guard) = self.try_acquire() else {
            tracing::debug!("export rejected: worker busy");
            return Err(ExportError::Busy);
        };

        tracing::debug!(width = target.width(), height = target.height(), "export submitted");
        let handle = self.runtime.spawn_blocking(move || {
            let _guard = guard;
            export_scene(&scene, target)
        });
        Ok(ExportTicket { handle })
    }
}

/// Pending result of a submitted export.
#[derive(Debug)]
pub struct ExportTicket {
    handle: JoinHandle<std::result::Result<ExportedImage, ExportError>>,
}

impl ExportTicket {
    /// Waits for the export to finish.
    ///
    /// # Errors
    ///
    /// Returns the export's own error, or [`ExportError::Cancelled`] if the
    /// task panicked or was aborted.
    pub async fn wait(self) -> std::result::Result<ExportedImage, ExportError> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, "export task did not complete");
                Err(ExportError::Cancelled)
            }
        }
    }
}
