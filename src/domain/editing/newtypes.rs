// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides type-safe wrappers for editing values,
//! ensuring they are always within valid ranges.

use crate::config::{
    DEFAULT_ADJUSTMENT_PERCENT, DEFAULT_ZOOM, MAX_ADJUSTMENT_PERCENT, MAX_ZOOM,
    MIN_ADJUSTMENT_PERCENT, MIN_ZOOM,
};

// =============================================================================
// ZoomFactor
// =============================================================================

/// Background zoom factor, guaranteed to be within valid range (0.1–10).
///
/// This type ensures that zoom values are always valid, eliminating
/// the need for manual clamping at usage sites. Non-finite input
/// (NaN) falls back to the default; infinities saturate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Creates a new zoom factor, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_nan() {
            return Self::default();
        }
        Self(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the zoom is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ZOOM
    }

    /// Returns whether the zoom is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ZOOM
    }

    /// Multiplies the zoom by `factor`, clamping the result.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.0 * factor)
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

// =============================================================================
// AdjustmentPercent
// =============================================================================

/// Brightness or contrast percentage, guaranteed to be within valid range (50–150).
///
/// A value of 100 means no adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AdjustmentPercent(i32);

impl AdjustmentPercent {
    /// Creates a new adjustment value, clamping to the valid range.
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self(value.clamp(MIN_ADJUSTMENT_PERCENT, MAX_ADJUSTMENT_PERCENT))
    }

    /// Creates an adjustment from a float slider value, rounding to the nearest percent.
    #[must_use]
    pub fn from_f32(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        #[allow(clippy::cast_possible_truncation)]
        let rounded = value
            .round()
            .clamp(MIN_ADJUSTMENT_PERCENT as f32, MAX_ADJUSTMENT_PERCENT as f32)
            as i32;
        Self::new(rounded)
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }

    /// Returns whether this represents no adjustment (value is 100).
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self.0 == DEFAULT_ADJUSTMENT_PERCENT
    }

    /// Returns whether the adjustment is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ADJUSTMENT_PERCENT
    }

    /// Returns whether the adjustment is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ADJUSTMENT_PERCENT
    }
}

impl Default for AdjustmentPercent {
    fn default() -> Self {
        Self(DEFAULT_ADJUSTMENT_PERCENT)
    }
}

// =============================================================================
// CanvasSize
// =============================================================================

/// Pixel size of a drawing surface. Both sides are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    width: u32,
    height: u32,
}

impl CanvasSize {
    /// Creates a canvas size, raising zero sides to 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Canvas sized to `aspect_ratio` with its long side equal to `max_dimension`.
    #[must_use]
    pub fn for_aspect_ratio(aspect_ratio: f32, max_dimension: u32) -> Self {
        let max = max_dimension.max(1);
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Self::new(max, max);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        if aspect_ratio >= 1.0 {
            Self::new(max, (max as f32 / aspect_ratio).round() as u32)
        } else {
            Self::new((max as f32 * aspect_ratio).round() as u32, max)
        }
    }

    #[must_use]
    pub fn width(self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u32 {
        self.height
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Larger of the two sides.
    #[must_use]
    pub fn max_dimension(self) -> u32 {
        self.width.max(self.height)
    }

    /// Pixel count.
    #[must_use]
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_CANVAS_DIMENSION,
            crate::config::DEFAULT_CANVAS_DIMENSION,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // ZoomFactor tests
    // -------------------------------------------------------------------------

    #[test]
    fn zoom_factor_clamps() {
        assert_eq!(ZoomFactor::new(0.01).value(), MIN_ZOOM);
        assert_eq!(ZoomFactor::new(50.0).value(), MAX_ZOOM);
        assert_eq!(ZoomFactor::new(2.5).value(), 2.5);
    }

    #[test]
    fn zoom_factor_clamp_is_idempotent() {
        for raw in [-3.0, 0.0, 0.1, 0.5, 1.0, 9.99, 10.0, 11.0, f32::INFINITY] {
            let once = ZoomFactor::new(raw);
            let twice = ZoomFactor::new(once.value());
            assert_eq!(once, twice, "clamping {raw} twice changed the value");
        }
    }

    #[test]
    fn zoom_factor_clamp_is_monotonic() {
        let raws = [-1.0, 0.05, 0.1, 0.3, 1.0, 4.2, 10.0, 25.0];
        for pair in raws.windows(2) {
            assert!(ZoomFactor::new(pair[0]).value() <= ZoomFactor::new(pair[1]).value());
        }
    }

    #[test]
    fn zoom_factor_nan_falls_back_to_default() {
        assert_eq!(ZoomFactor::new(f32::NAN), ZoomFactor::default());
    }

    #[test]
    fn zoom_factor_min_max() {
        assert!(ZoomFactor::new(MIN_ZOOM).is_min());
        assert!(ZoomFactor::new(MAX_ZOOM).is_max());
        assert!(!ZoomFactor::default().is_min());
        assert!(!ZoomFactor::default().is_max());
    }

    #[test]
    fn zoom_factor_scaled_clamps() {
        assert_eq!(ZoomFactor::new(8.0).scaled(2.0).value(), MAX_ZOOM);
        assert_eq!(ZoomFactor::new(2.0).scaled(0.5).value(), 1.0);
    }

    // -------------------------------------------------------------------------
    // AdjustmentPercent tests
    // -------------------------------------------------------------------------

    #[test]
    fn adjustment_percent_clamps() {
        assert_eq!(AdjustmentPercent::new(200).value(), MAX_ADJUSTMENT_PERCENT);
        assert_eq!(AdjustmentPercent::new(0).value(), MIN_ADJUSTMENT_PERCENT);
        assert_eq!(AdjustmentPercent::new(120).value(), 120);
    }

    #[test]
    fn adjustment_percent_default_is_neutral() {
        assert!(AdjustmentPercent::default().is_neutral());
        assert_eq!(AdjustmentPercent::default().value(), 100);
    }

    #[test]
    fn adjustment_percent_from_f32_rounds() {
        assert_eq!(AdjustmentPercent::from_f32(110.6).value(), 111);
        assert_eq!(AdjustmentPercent::from_f32(1e9).value(), MAX_ADJUSTMENT_PERCENT);
        assert!(AdjustmentPercent::from_f32(f32::NAN).is_neutral());
    }

    #[test]
    fn adjustment_percent_boundary_checks() {
        assert!(AdjustmentPercent::new(50).is_min());
        assert!(AdjustmentPercent::new(150).is_max());
        assert!(!AdjustmentPercent::new(120).is_neutral());
    }

    // -------------------------------------------------------------------------
    // CanvasSize tests
    // -------------------------------------------------------------------------

    #[test]
    fn canvas_size_is_always_positive() {
        let size = CanvasSize::new(0, 0);
        assert_eq!((size.width(), size.height()), (1, 1));
    }

    #[test]
    fn canvas_size_for_landscape_aspect_ratio() {
        let size = CanvasSize::for_aspect_ratio(2.0, 2000);
        assert_eq!((size.width(), size.height()), (2000, 1000));
    }

    #[test]
    fn canvas_size_for_portrait_aspect_ratio() {
        let size = CanvasSize::for_aspect_ratio(0.8, 2000);
        assert_eq!((size.width(), size.height()), (1600, 2000));
    }

    #[test]
    fn canvas_size_for_invalid_aspect_ratio_is_square() {
        let size = CanvasSize::for_aspect_ratio(f32::NAN, 500);
        assert_eq!((size.width(), size.height()), (500, 500));
    }
}
