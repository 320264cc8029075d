// SPDX-License-Identifier: MPL-2.0
//! Interaction state for the editor preview.
//!
//! Gesture tracking, slider stepping and redraw coalescing live here, apart
//! from the session that owns the edited values.

pub mod gesture;
pub mod redraw;
pub mod slider;

pub use gesture::{
    GestureContext, GestureController, GestureState, GestureUpdate, PointerEvent, PointerPhase,
    SurfaceBounds, WheelEvent,
};
pub use redraw::RedrawScheduler;
pub use slider::{SliderControl, SliderKey, SliderSpec};
