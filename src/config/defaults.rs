// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Background zoom factor bounds and slider step
//! - **Adjustment**: Brightness/contrast percentage bounds
//! - **Framing**: Frame margin, auto-fit overscan, default canvas size
//! - **Gestures**: Inertia, velocity and wheel tuning
//! - **Export**: Default filename prefix

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Default zoom factor before auto-fit runs (1.0 = native photo size).
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Minimum allowed zoom factor.
pub const MIN_ZOOM: f32 = 0.1;

/// Maximum allowed zoom factor.
pub const MAX_ZOOM: f32 = 10.0;

/// Zoom slider step (keyboard arrows and track snapping).
pub const ZOOM_STEP: f32 = 0.1;

// ==========================================================================
// Adjustment Defaults
// ==========================================================================

/// Neutral brightness/contrast percentage.
pub const DEFAULT_ADJUSTMENT_PERCENT: i32 = 100;

/// Minimum brightness/contrast percentage.
pub const MIN_ADJUSTMENT_PERCENT: i32 = 50;

/// Maximum brightness/contrast percentage.
pub const MAX_ADJUSTMENT_PERCENT: i32 = 150;

/// Brightness/contrast slider step.
pub const ADJUSTMENT_STEP: i32 = 1;

// ==========================================================================
// Framing Defaults
// ==========================================================================

/// Fraction of the canvas extent the frame occupies on its constrained axis.
pub const DEFAULT_FRAME_MARGIN: f32 = 0.88;

/// Smallest accepted frame margin from configuration.
pub const MIN_FRAME_MARGIN: f32 = 0.1;

/// Largest accepted frame margin from configuration.
pub const MAX_FRAME_MARGIN: f32 = 1.0;

/// Auto-fit overscan so the photo always covers the frame opening.
pub const AUTO_FIT_OVERSCAN: f32 = 1.05;

/// Long side of the canvas created for a freshly loaded frame.
pub const DEFAULT_CANVAS_DIMENSION: u32 = 2000;

/// Smallest accepted default canvas dimension from configuration.
pub const MIN_CANVAS_DIMENSION: u32 = 64;

/// Largest accepted default canvas dimension from configuration.
pub const MAX_CANVAS_DIMENSION: u32 = 8192;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Velocity multiplier applied on every inertia tick.
pub const DEFAULT_INERTIA_FRICTION: f32 = 0.92;

/// Below this speed on both axes, inertia stops.
pub const INERTIA_REST_VELOCITY: f32 = 0.1;

/// Minimum release speed (px per reference tick) that starts inertia.
pub const INERTIA_START_VELOCITY: f32 = 2.0;

/// Minimum drag duration (ms) before a release may start inertia.
pub const INERTIA_MIN_DRAG_MS: f64 = 50.0;

/// Reference tick used to normalize drag velocity (one frame at 60 Hz).
pub const VELOCITY_REFERENCE_TICK_MS: f64 = 16.0;

/// Time after a gesture ends during which preview filters stay suspended.
pub const GESTURE_SETTLE_MS: f64 = 100.0;

/// Default wheel zoom sensitivity (zoom factor exponent per delta unit).
pub const DEFAULT_WHEEL_SENSITIVITY: f32 = 0.001;

// ==========================================================================
// Export Defaults
// ==========================================================================

/// Default prefix for exported file names.
pub const DEFAULT_EXPORT_PREFIX: &str = "framed_photo";
