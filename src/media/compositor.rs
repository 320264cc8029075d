// SPDX-License-Identifier: MPL-2.0
//! Layered scene rendering.
//!
//! Draws a clipped, color-adjusted background photo with the frame on top.
//! The same routine serves the live preview and full-resolution export:
//! geometry is recomputed from the target surface size, and the zoom and
//! offset chosen on the preview canvas are scaled so the export shows the
//! same composition.

use tiny_skia::{
    FillRule, FilterQuality, Mask, PathBuilder, Pixmap, PixmapPaint, Rect as SkRect, Transform,
};

use crate::domain::editing::{AdjustmentPercent, CanvasSize, ZoomFactor};
use crate::domain::framing::{frame_display_rect, Point, Rect};
use crate::error::ExportError;
use crate::media::image::RasterImage;
use crate::media::image_transform::adjust_brightness_contrast;

/// Whether a render is for the live preview or for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Interactive preview. Filters are skipped while a gesture is active.
    Preview { gesture_active: bool },
    /// Final output. Filters always apply.
    Export,
}

impl RenderMode {
    fn applies_filters(self) -> bool {
        match self {
            RenderMode::Preview { gesture_active } => !gesture_active,
            RenderMode::Export => true,
        }
    }
}

/// Everything the renderer needs to draw one frame.
///
/// Images are shared handles, so a scene is cheap to clone and can be sent
/// to a background export task.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Option<RasterImage>,
    pub frame: Option<RasterImage>,
    pub show_frame: bool,
    pub zoom: ZoomFactor,
    pub position: Point,
    pub brightness: AdjustmentPercent,
    pub contrast: AdjustmentPercent,
    pub frame_margin: f32,
    /// Canvas the zoom and position were chosen on.
    pub canvas_size: CanvasSize,
}

impl Scene {
    fn frame_rect(&self, canvas: CanvasSize) -> Rect {
        frame_display_rect(
            self.frame.as_ref().map(RasterImage::dimensions),
            canvas,
            self.frame_margin,
        )
    }

    /// Factor mapping preview-canvas lengths onto `target`.
    fn scale_to(&self, target: CanvasSize) -> f32 {
        let from = self.frame_rect(self.canvas_size);
        let to = self.frame_rect(target);
        if from.width <= 0.0 || from.height <= 0.0 {
            return 1.0;
        }
        (to.width / from.width).min(to.height / from.height)
    }
}

struct FilteredBackground {
    source: RasterImage,
    brightness: AdjustmentPercent,
    contrast: AdjustmentPercent,
    pixmap: Pixmap,
}

/// Draws scenes onto surfaces.
///
/// Keeps the last color-adjusted background so repeated preview frames with
/// unchanged brightness and contrast skip the per-pixel pass.
#[derive(Default)]
pub struct CompositeRenderer {
    filtered: Option<FilteredBackground>,
}

impl std::fmt::Debug for CompositeRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeRenderer")
            .field("cached", &self.filtered.is_some())
            .finish()
    }
}

impl CompositeRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached adjusted background.
    pub fn clear_cache(&mut self) {
        self.filtered = None;
    }

    /// Renders `scene` onto `surface`, replacing its previous content.
    pub fn render(&mut self, surface: &mut Pixmap, scene: &Scene, mode: RenderMode) {
        surface.fill(tiny_skia::Color::TRANSPARENT);

        let Some(background) = &scene.background else {
            return;
        };

        let target = CanvasSize::new(surface.width(), surface.height());
        let frame_rect = scene.frame_rect(target);
        let scale = scene.scale_to(target);

        let adjust =
            mode.applies_filters() && !(scene.brightness.is_neutral() && scene.contrast.is_neutral());
        let source = if adjust {
            self.filtered_background(background, scene.brightness, scene.contrast)
        } else {
            background.pixmap()
        };

        let clip = if scene.frame.is_some() {
            clip_mask(target, &frame_rect)
        } else {
            None
        };
        if scene.frame.is_some() && clip.is_none() {
            // Degenerate frame rect: nothing of the background is visible.
            return;
        }

        let zoom = scene.zoom.value() * scale;
        let draw_w = background.width() as f32 * zoom;
        let draw_h = background.height() as f32 * zoom;
        let x = (target.width() as f32 - draw_w) / 2.0 + scene.position.x * scale;
        let y = (target.height() as f32 - draw_h) / 2.0 + scene.position.y * scale;

        surface.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint(),
            Transform::from_row(zoom, 0.0, 0.0, zoom, x, y),
            clip.as_ref(),
        );

        if let (Some(frame), true) = (&scene.frame, scene.show_frame) {
            let sx = frame_rect.width / frame.width() as f32;
            let sy = frame_rect.height / frame.height() as f32;
            surface.draw_pixmap(
                0,
                0,
                frame.pixmap().as_ref(),
                &paint(),
                Transform::from_row(sx, 0.0, 0.0, sy, frame_rect.x, frame_rect.y),
                None,
            );
        }
    }

    fn filtered_background(
        &mut self,
        background: &RasterImage,
        brightness: AdjustmentPercent,
        contrast: AdjustmentPercent,
    ) -> &Pixmap {
        let stale = self.filtered.as_ref().is_none_or(|cached| {
            !cached.source.same_pixels(background)
                || cached.brightness != brightness
                || cached.contrast != contrast
        });
        if stale {
            self.filtered = None;
        }
        let cached = self.filtered.get_or_insert_with(|| FilteredBackground {
            source: background.clone(),
            brightness,
            contrast,
            pixmap: adjust_brightness_contrast(background.pixmap(), brightness, contrast),
        });
        &cached.pixmap
    }
}

fn paint() -> PixmapPaint {
    PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    }
}

fn clip_mask(canvas: CanvasSize, rect: &Rect) -> Option<Mask> {
    let sk_rect = SkRect::from_xywh(rect.x, rect.y, rect.width, rect.height)?;
    let mut mask = Mask::new(canvas.width(), canvas.height())?;
    let path = PathBuilder::from_rect(sk_rect);
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    Some(mask)
}

/// Renders `scene` onto a fresh surface of `target` size in export mode.
///
/// # Errors
///
/// Returns [`ExportError::InvalidSurface`] if the surface cannot be allocated.
#[tracing::instrument(level = "debug", skip(scene))]
pub fn render_export(scene: &Scene, target: CanvasSize) -> Result<Pixmap, ExportError> {
    let mut surface =
        Pixmap::new(target.width(), target.height()).ok_or(ExportError::InvalidSurface {
            width: target.width(),
            height: target.height(),
        })?;
    CompositeRenderer::new().render(&mut surface, scene, RenderMode::Export);
    Ok(surface)
}
