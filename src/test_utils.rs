// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Geometry, zoom and velocity values are `f32`; compare them with the
//! `approx` assertion macros rather than `assert_eq!`.

pub use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq};

/// Epsilon for canvas-space lengths that should match to well under a pixel.
pub const PIXEL_EPSILON: f32 = 1e-3;
