// SPDX-License-Identifier: MPL-2.0
//! Frame placement, background fitting and output resolutions.

pub mod geometry;
pub mod resolution;

pub use geometry::{
    anchored_position, auto_fit, background_rect, frame_display_rect, AutoFit, Dimensions,
    FrameDisplayRect, Point, Rect,
};
pub use resolution::{valid_resolutions, Resolution, ResolutionKind};
