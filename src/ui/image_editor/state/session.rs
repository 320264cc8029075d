// SPDX-License-Identifier: MPL-2.0
//! The adjustable editing state as a value type.
//!
//! Transitions consume the session and return the next one, so they can be
//! tested without a surface or a gesture controller.

use crate::domain::editing::{AdjustmentPercent, CanvasSize, ZoomFactor};
use crate::domain::framing::{auto_fit, frame_display_rect, Point, Rect};
use crate::media::{RasterImage, Scene};

/// Photo, frame and the user's adjustments.
#[derive(Debug, Clone)]
pub struct Session {
    background: Option<RasterImage>,
    frame: Option<RasterImage>,
    brightness: AdjustmentPercent,
    contrast: AdjustmentPercent,
    zoom: ZoomFactor,
    position: Point,
    canvas_size: CanvasSize,
    show_frame: bool,
}

impl Session {
    /// Starts a session around a fixed `frame`.
    ///
    /// The canvas takes the frame's aspect ratio with its long side at
    /// `max_dimension`; without a frame it is square.
    #[must_use]
    pub fn new(frame: Option<RasterImage>, max_dimension: u32) -> Self {
        let canvas_size = match &frame {
            Some(frame) => {
                CanvasSize::for_aspect_ratio(frame.dimensions().aspect_ratio(), max_dimension)
            }
            None => CanvasSize::new(max_dimension, max_dimension),
        };
        Self {
            background: None,
            frame,
            brightness: AdjustmentPercent::default(),
            contrast: AdjustmentPercent::default(),
            zoom: ZoomFactor::default(),
            position: Point::ZERO,
            canvas_size,
            show_frame: true,
        }
    }

    #[must_use]
    pub fn background(&self) -> Option<&RasterImage> {
        self.background.as_ref()
    }

    #[must_use]
    pub fn frame(&self) -> Option<&RasterImage> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// True when both the photo and the frame are loaded.
    #[must_use]
    pub fn is_paired(&self) -> bool {
        self.background.is_some() && self.frame.is_some()
    }

    #[must_use]
    pub fn brightness(&self) -> AdjustmentPercent {
        self.brightness
    }

    #[must_use]
    pub fn contrast(&self) -> AdjustmentPercent {
        self.contrast
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomFactor {
        self.zoom
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }

    #[must_use]
    pub fn show_frame(&self) -> bool {
        self.show_frame
    }

    /// Frame rect on the current canvas.
    #[must_use]
    pub fn frame_rect(&self, margin: f32) -> Rect {
        frame_display_rect(
            self.frame.as_ref().map(RasterImage::dimensions),
            self.canvas_size,
            margin,
        )
    }

    /// Replaces the photo, recenters it and fits it to the frame.
    #[must_use]
    pub fn with_background(mut self, background: RasterImage, margin: f32) -> Self {
        self.background = Some(background);
        self.position = Point::ZERO;
        self.auto_fitted(margin)
    }

    /// Removes the photo and returns zoom and offset to their defaults.
    #[must_use]
    pub fn without_background(mut self) -> Self {
        self.background = None;
        self.zoom = ZoomFactor::default();
        self.position = Point::ZERO;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = ZoomFactor::new(zoom);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        if position.is_finite() {
            self.position = position;
        }
        self
    }

    /// Applies a zoom and offset pair produced by a gesture.
    #[must_use]
    pub fn with_transform(self, zoom: ZoomFactor, position: Point) -> Self {
        let mut next = self.with_position(position);
        next.zoom = zoom;
        next
    }

    #[must_use]
    pub fn with_brightness(mut self, value: i32) -> Self {
        self.brightness = AdjustmentPercent::new(value);
        self
    }

    #[must_use]
    pub fn with_contrast(mut self, value: i32) -> Self {
        self.contrast = AdjustmentPercent::new(value);
        self
    }

    /// Changes the canvas only. Zoom, offset and color stay as they are.
    #[must_use]
    pub fn with_canvas_size(mut self, canvas_size: CanvasSize) -> Self {
        self.canvas_size = canvas_size;
        self
    }

    #[must_use]
    pub fn with_frame_visibility(mut self, show_frame: bool) -> Self {
        self.show_frame = show_frame;
        self
    }

    /// Scales the photo to cover the frame with a small bleed.
    ///
    /// Needs both images; otherwise the session is returned unchanged.
    #[must_use]
    pub fn auto_fitted(mut self, margin: f32) -> Self {
        let Some(background) = self.background.as_ref().filter(|_| self.frame.is_some()) else {
            return self;
        };
        let fit = auto_fit(background.dimensions(), &self.frame_rect(margin));
        self.zoom = fit.zoom;
        self.position = fit.position;
        self
    }

    /// Restores default color, zoom and offset, then refits the photo.
    #[must_use]
    pub fn reset(mut self, margin: f32) -> Self {
        self.brightness = AdjustmentPercent::default();
        self.contrast = AdjustmentPercent::default();
        self.zoom = ZoomFactor::default();
        self.position = Point::ZERO;
        self.auto_fitted(margin)
    }

    /// Snapshot for the renderer.
    #[must_use]
    pub fn scene(&self, frame_margin: f32) -> Scene {
        Scene {
            background: self.background.clone(),
            frame: self.frame.clone(),
            show_frame: self.show_frame,
            zoom: self.zoom,
            position: self.position,
            brightness: self.brightness,
            contrast: self.contrast,
            frame_margin,
            canvas_size: self.canvas_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::DEFAULT_FRAME_MARGIN;
    use crate::test_utils::assert_abs_diff_eq;
    use tiny_skia::Pixmap;

    fn image(width: u32, height: u32) -> RasterImage {
        RasterImage::from_pixmap(Pixmap::new(width, height).expect("pixmap"))
    }

    #[test]
    fn new_session_follows_frame_aspect_ratio() {
        let session = Session::new(Some(image(1000, 500)), 2000);
        assert_eq!(session.canvas_size(), CanvasSize::new(2000, 1000));

        let portrait = Session::new(Some(image(400, 800)), 2000);
        assert_eq!(portrait.canvas_size(), CanvasSize::new(1000, 2000));

        let frameless = Session::new(None, 2000);
        assert_eq!(frameless.canvas_size(), CanvasSize::new(2000, 2000));
    }

    #[test]
    fn new_session_uses_neutral_defaults() {
        let session = Session::new(None, 2000);
        assert_eq!(session.brightness().value(), 100);
        assert_eq!(session.contrast().value(), 100);
        assert_abs_diff_eq!(session.zoom().value(), 1.0);
        assert_eq!(session.position(), Point::ZERO);
        assert!(session.show_frame());
        assert!(!session.has_background());
    }

    #[test]
    fn with_background_auto_fits_to_frame() {
        let session = Session::new(Some(image(1000, 500)), 2000)
            .with_position(Point::new(40.0, -12.0))
            .with_background(image(1000, 1000), DEFAULT_FRAME_MARGIN);

        let rect = session.frame_rect(DEFAULT_FRAME_MARGIN);
        let expected = (rect.width / 1000.0).max(rect.height / 1000.0) * 1.05;
        assert_abs_diff_eq!(session.zoom().value(), expected, epsilon = 1e-4);
        assert_eq!(session.position(), Point::ZERO);
        assert!(session.is_paired());
    }

    #[test]
    fn with_background_without_frame_keeps_zoom() {
        let session = Session::new(None, 2000)
            .with_zoom(2.5)
            .with_position(Point::new(3.0, 4.0))
            .with_background(image(10, 10), DEFAULT_FRAME_MARGIN);
        assert_abs_diff_eq!(session.zoom().value(), 2.5);
        assert_eq!(session.position(), Point::ZERO);
    }

    #[test]
    fn setters_clamp_their_values() {
        let session = Session::new(None, 100)
            .with_zoom(50.0)
            .with_brightness(400)
            .with_contrast(-3);
        assert!(session.zoom().is_max());
        assert_eq!(session.brightness().value(), 150);
        assert_eq!(session.contrast().value(), 50);
    }

    #[test]
    fn non_finite_position_is_ignored() {
        let session = Session::new(None, 100)
            .with_position(Point::new(5.0, 6.0))
            .with_position(Point::new(f32::NAN, 1.0));
        assert_eq!(session.position(), Point::new(5.0, 6.0));
    }

    #[test]
    fn canvas_change_keeps_adjustments() {
        let session = Session::new(Some(image(1000, 500)), 2000)
            .with_background(image(3000, 1500), DEFAULT_FRAME_MARGIN)
            .with_zoom(1.7)
            .with_position(Point::new(-20.0, 15.0))
            .with_brightness(120)
            .with_contrast(80);

        let resized = session.clone().with_canvas_size(CanvasSize::new(1080, 540));
        assert_eq!(resized.canvas_size(), CanvasSize::new(1080, 540));
        assert_abs_diff_eq!(resized.zoom().value(), session.zoom().value());
        assert_eq!(resized.position(), session.position());
        assert_eq!(resized.brightness(), session.brightness());
        assert_eq!(resized.contrast(), session.contrast());
    }

    #[test]
    fn reset_matches_fresh_upload() {
        let frame = image(1000, 500);
        let photo = image(1600, 1200);

        let fresh = Session::new(Some(frame.clone()), 2000)
            .with_background(photo.clone(), DEFAULT_FRAME_MARGIN);
        let reset = Session::new(Some(frame), 2000)
            .with_background(photo, DEFAULT_FRAME_MARGIN)
            .with_zoom(4.0)
            .with_position(Point::new(300.0, -80.0))
            .with_brightness(60)
            .with_contrast(140)
            .reset(DEFAULT_FRAME_MARGIN);

        assert_abs_diff_eq!(reset.zoom().value(), fresh.zoom().value());
        assert_eq!(reset.position(), fresh.position());
        assert_eq!(reset.brightness(), fresh.brightness());
        assert_eq!(reset.contrast(), fresh.contrast());
        assert_eq!(reset.canvas_size(), fresh.canvas_size());
    }

    #[test]
    fn without_background_restores_zoom_and_offset() {
        let session = Session::new(Some(image(10, 10)), 100)
            .with_background(image(50, 50), DEFAULT_FRAME_MARGIN)
            .with_position(Point::new(9.0, 9.0))
            .without_background();
        assert!(!session.has_background());
        assert_abs_diff_eq!(session.zoom().value(), 1.0);
        assert_eq!(session.position(), Point::ZERO);
        assert!(session.frame().is_some());
    }

    #[test]
    fn scene_carries_session_values() {
        let session = Session::new(Some(image(20, 10)), 200)
            .with_frame_visibility(false)
            .with_brightness(110);
        let scene = session.scene(0.5);
        assert!(!scene.show_frame);
        assert_eq!(scene.brightness.value(), 110);
        assert_abs_diff_eq!(scene.frame_margin, 0.5);
        assert_eq!(scene.canvas_size, CanvasSize::new(200, 100));
    }
}
