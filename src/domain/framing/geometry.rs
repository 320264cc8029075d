// SPDX-License-Identifier: MPL-2.0
//! Frame placement and background fitting.
//!
//! All functions here are pure: they take dimensions and return rectangles
//! or offsets in canvas pixel space. Background offsets are measured from
//! the canvas center, so an offset of `(0, 0)` centers the photo.

use std::ops::{Add, AddAssign, Mul, Sub};

use crate::config::AUTO_FIT_OVERSCAN;
use crate::domain::editing::{CanvasSize, ZoomFactor};

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height. Degenerate sizes report 1.0.
    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Larger of the two sides.
    #[must_use]
    pub fn max_dimension(self) -> u32 {
        self.width.max(self.height)
    }
}

/// A point or offset in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Returns true when both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns true when `other` lies entirely inside `self`, allowing `epsilon` slack.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect, epsilon: f32) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }
}

/// Where the frame is drawn on a canvas.
///
/// Without a frame this is the margin-scaled canvas, centered. It then only
/// sizes auto-fit and export scaling; nothing is clipped to it.
pub type FrameDisplayRect = Rect;

/// Zoom and offset that make a background cover the frame opening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoFit {
    pub zoom: ZoomFactor,
    pub position: Point,
}

/// Computes where the frame sits on the canvas.
///
/// The frame keeps its aspect ratio and fills `margin` of the canvas along
/// the constraining axis, centered on the other.
#[must_use]
pub fn frame_display_rect(
    frame: Option<Dimensions>,
    canvas: CanvasSize,
    margin: f32,
) -> FrameDisplayRect {
    let canvas_w = canvas.width() as f32;
    let canvas_h = canvas.height() as f32;

    let (width, height) = match frame {
        None => (canvas_w * margin, canvas_h * margin),
        Some(frame) => fitted_size(frame.aspect_ratio(), canvas, margin),
    };

    Rect::new(
        (canvas_w - width) / 2.0,
        (canvas_h - height) / 2.0,
        width,
        height,
    )
}

fn fitted_size(frame_ar: f32, canvas: CanvasSize, margin: f32) -> (f32, f32) {
    let canvas_w = canvas.width() as f32;
    let canvas_h = canvas.height() as f32;
    if frame_ar > canvas.aspect_ratio() {
        let width = canvas_w * margin;
        (width, width / frame_ar)
    } else {
        let height = canvas_h * margin;
        (height * frame_ar, height)
    }
}

/// Zoom and offset so the background fully covers `rect`.
///
/// The background is centered with a slight overscan. The zoom is clamped
/// to the allowed range, so extreme sizes may not reach full coverage.
#[must_use]
pub fn auto_fit(background: Dimensions, rect: &Rect) -> AutoFit {
    let bg_w = background.width.max(1) as f32;
    let bg_h = background.height.max(1) as f32;
    let scale = (rect.width / bg_w).max(rect.height / bg_h);

    AutoFit {
        zoom: ZoomFactor::new(scale * AUTO_FIT_OVERSCAN),
        position: Point::ZERO,
    }
}

/// Rectangle the background occupies on a canvas of `canvas` size.
#[must_use]
pub fn background_rect(
    background: Dimensions,
    canvas: CanvasSize,
    zoom: ZoomFactor,
    position: Point,
) -> Rect {
    let width = background.width as f32 * zoom.value();
    let height = background.height as f32 * zoom.value();
    let center = Point::new(canvas.width() as f32 / 2.0, canvas.height() as f32 / 2.0) + position;
    Rect::new(
        center.x - width / 2.0,
        center.y - height / 2.0,
        width,
        height,
    )
}

/// New background offset after zooming from `old_zoom` to `new_zoom` around `anchor`.
///
/// The photo pixel under `anchor` stays under `anchor`. The offset is
/// measured from the photo center (`canvas_center + position`), so it holds
/// for any starting `position`, not only a centered photo.
#[must_use]
pub fn anchored_position(
    position: Point,
    anchor: Point,
    canvas: CanvasSize,
    old_zoom: ZoomFactor,
    new_zoom: ZoomFactor,
) -> Point {
    let canvas_center = Point::new(canvas.width() as f32 / 2.0, canvas.height() as f32 / 2.0);
    let photo_center = canvas_center + position;
    let ratio = new_zoom.value() / old_zoom.value();
    position + (anchor - photo_center) * (1.0 - ratio)
}
