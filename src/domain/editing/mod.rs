// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for the compositing editor:
//! - [`ZoomFactor`]: Background zoom, clamped to 0.1–10
//! - [`AdjustmentPercent`]: Brightness/contrast value, clamped to 50–150
//! - [`CanvasSize`]: Positive surface dimensions

pub mod newtypes;

pub use newtypes::{AdjustmentPercent, CanvasSize, ZoomFactor};
