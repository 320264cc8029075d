// SPDX-License-Identifier: MPL-2.0
//! Raster loading and upload validation.
//!
//! Raster formats (PNG, JPEG, WebP, ...) decode through the `image` crate.
//! SVG frames are rasterized at their intrinsic size with `resvg`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use image_rs::GenericImageView;
use resvg::usvg;
use tiny_skia::{ColorU8, IntSize, Pixmap};

use crate::domain::framing::Dimensions;
use crate::error::{Error, ImageError, MAX_UPLOAD_BYTES};

const SVG_MIME: &str = "image/svg+xml";

/// A decoded image ready to draw.
///
/// Pixels are premultiplied RGBA. Cloning is cheap; the pixel buffer is shared.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixmap: Arc<Pixmap>,
}

impl RasterImage {
    #[must_use]
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            pixmap: Arc::new(pixmap),
        }
    }

    /// Builds an image from straight (non-premultiplied) RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::DecodeFailure`] when a side is zero or the buffer
    /// length does not match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, mut rgba: Vec<u8>) -> Result<Self, ImageError> {
        let size = IntSize::from_wh(width, height).ok_or_else(|| {
            ImageError::DecodeFailure(format!("invalid image size {width}x{height}"))
        })?;

        for px in rgba.chunks_exact_mut(4) {
            let color = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
            px[0] = color.red();
            px[1] = color.green();
            px[2] = color.blue();
            px[3] = color.alpha();
        }

        Pixmap::from_vec(rgba, size)
            .map(Self::from_pixmap)
            .ok_or_else(|| ImageError::DecodeFailure("pixel buffer size mismatch".into()))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    /// The drawable pixel surface.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Returns true when both handles share one pixel buffer.
    #[must_use]
    pub fn same_pixels(&self, other: &RasterImage) -> bool {
        Arc::ptr_eq(&self.pixmap, &other.pixmap)
    }
}

/// Raw bytes handed over by the file-picking collaborator.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// Declared MIME type, if the source provided one.
    pub mime_type: Option<String>,
    pub file_name: Option<String>,
}

impl ImageUpload {
    #[must_use]
    pub fn new(bytes: Vec<u8>, mime_type: Option<String>) -> Self {
        Self {
            bytes,
            mime_type,
            file_name: None,
        }
    }
}

/// Validates and decodes an upload.
///
/// # Errors
///
/// - [`ImageError::FileTooLarge`] above 50 MB
/// - [`ImageError::InvalidFileType`] when the declared MIME type is not `image/*`,
///   or no type was declared and the content is not a recognized image
/// - [`ImageError::DecodeFailure`] when decoding fails
pub fn decode_upload(upload: &ImageUpload) -> Result<RasterImage, ImageError> {
    let size = upload.bytes.len() as u64;
    if size > MAX_UPLOAD_BYTES {
        return Err(ImageError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let is_svg = match upload.mime_type.as_deref() {
        Some(mime) if !mime.starts_with("image/") => {
            return Err(ImageError::InvalidFileType(mime.to_string()));
        }
        Some(mime) => mime == SVG_MIME,
        None => {
            if looks_like_svg(&upload.bytes) {
                true
            } else if image_rs::guess_format(&upload.bytes).is_ok() {
                false
            } else {
                return Err(ImageError::InvalidFileType(
                    upload
                        .file_name
                        .clone()
                        .unwrap_or_else(|| "unknown".to_string()),
                ));
            }
        }
    };

    let image = if is_svg {
        rasterize_svg(&upload.bytes)?
    } else {
        decode_raster(&upload.bytes)?
    };

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        bytes = size,
        "decoded upload"
    );
    Ok(image)
}

/// Loads an image file from disk, applying the same checks as uploads.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or an [`ImageError`]
/// from [`decode_upload`].
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<RasterImage, Error> {
    let path = path.as_ref();

    let size = fs::metadata(path)?.len();
    if size > MAX_UPLOAD_BYTES {
        return Err(ImageError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        }
        .into());
    }

    let upload = ImageUpload {
        bytes: fs::read(path)?,
        mime_type: mime_from_extension(path).map(str::to_string),
        file_name: path.file_name().map(|name| name.to_string_lossy().into_owned()),
    };
    Ok(decode_upload(&upload)?)
}

/// MIME type implied by a file extension, if it is a known image type.
#[must_use]
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "svg" => SVG_MIME,
        _ => return None,
    };
    Some(mime)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    String::from_utf8_lossy(head).contains("<svg")
}

fn decode_raster(bytes: &[u8]) -> Result<RasterImage, ImageError> {
    let img =
        image_rs::load_from_memory(bytes).map_err(|e| ImageError::DecodeFailure(e.to_string()))?;
    let (width, height) = img.dimensions();
    RasterImage::from_rgba(width, height, img.to_rgba8().into_vec())
}

fn rasterize_svg(bytes: &[u8]) -> Result<RasterImage, ImageError> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| ImageError::DecodeFailure(e.to_string()))?;

    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return Err(ImageError::DecodeFailure("SVG has empty dimensions".into()));
    }

    let mut pixmap = Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ImageError::DecodeFailure("failed to allocate SVG pixmap".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    Ok(RasterImage::from_pixmap(pixmap))
}
