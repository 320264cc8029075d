// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure compositing types and rules.
//!
//! Nothing in here touches pixels or I/O. Types are plain values that the
//! editor session and renderer build on.
//!
//! # Modules
//!
//! - [`editing`]: Clamped value objects ([`ZoomFactor`](editing::ZoomFactor),
//!   [`AdjustmentPercent`](editing::AdjustmentPercent), [`CanvasSize`](editing::CanvasSize))
//! - [`framing`]: Frame placement, auto-fit and resolution presets

pub mod editing;
pub mod framing;
