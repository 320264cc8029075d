// SPDX-License-Identifier: MPL-2.0
//! Pixel work: decoding uploads, color adjustment, compositing and export.

pub mod compositor;
pub mod export;
pub mod image;
pub mod image_transform;

pub use compositor::{render_export, CompositeRenderer, RenderMode, Scene};
pub use export::{export_scene, ExportFormat, ExportTicket, ExportWorker, ExportedImage};
pub use image::{decode_upload, load_from_path, ImageUpload, RasterImage};
