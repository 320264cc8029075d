// SPDX-License-Identifier: MPL-2.0
//! Pointer and touch gesture state machine.
//!
//! Turns raw pointer events into zoom and offset updates for the background
//! photo: one contact drags, two contacts pinch-zoom around their midpoint,
//! and a fast drag release coasts with decaying inertia.
//!
//! Only one gesture is active at a time. Malformed events (non-finite
//! coordinates, missing contacts, missing timestamps on moves) are ignored
//! and leave the state untouched.

use crate::config::{
    Config, DEFAULT_INERTIA_FRICTION, DEFAULT_WHEEL_SENSITIVITY, GESTURE_SETTLE_MS,
    INERTIA_MIN_DRAG_MS, INERTIA_REST_VELOCITY, INERTIA_START_VELOCITY,
    VELOCITY_REFERENCE_TICK_MS,
};
use crate::domain::editing::{CanvasSize, ZoomFactor};
use crate::domain::framing::{anchored_position, Point};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer or touch event in client coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Contacts still on the surface after this event.
    pub contacts: Vec<Point>,
    /// Event time in milliseconds, if the source provides one.
    pub timestamp_ms: Option<f64>,
}

impl PointerEvent {
    #[must_use]
    pub fn new(phase: PointerPhase, contacts: Vec<Point>, timestamp_ms: Option<f64>) -> Self {
        Self {
            phase,
            contacts,
            timestamp_ms,
        }
    }
}

/// A scroll-wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_y: f32,
    /// Cursor in client coordinates.
    pub cursor: Point,
    /// Whether the cursor is over the preview surface.
    pub over_surface: bool,
}

/// Where the preview surface sits in client space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceBounds {
    #[must_use]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounds that map client coordinates 1:1 onto a canvas.
    #[must_use]
    pub fn identity(canvas: CanvasSize) -> Self {
        Self::new(0.0, 0.0, canvas.width() as f32, canvas.height() as f32)
    }

    /// Maps a client point into canvas pixels.
    ///
    /// Returns `None` for degenerate bounds or non-finite input.
    #[must_use]
    pub fn to_canvas(&self, client: Point, canvas: CanvasSize) -> Option<Point> {
        if !(self.width > 0.0 && self.height > 0.0) || !client.is_finite() {
            return None;
        }
        let point = Point::new(
            (client.x - self.left) * canvas.width() as f32 / self.width,
            (client.y - self.top) * canvas.height() as f32 / self.height,
        );
        point.is_finite().then_some(point)
    }
}

/// Current transform and surface geometry a gesture operates on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub zoom: ZoomFactor,
    pub position: Point,
    pub canvas: CanvasSize,
    pub bounds: SurfaceBounds,
}

/// New transform produced by a gesture step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureUpdate {
    pub zoom: ZoomFactor,
    pub position: Point,
}

/// The active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position minus background offset at drag start.
        drag_start: Point,
        last_pos: Point,
        last_time: f64,
        /// Pixels per reference tick.
        velocity: Point,
        started_at: f64,
    },
    Pinching {
        initial_distance: f32,
        /// Base that the distance ratio scales.
        initial_zoom: ZoomFactor,
        /// Zoom the anchoring ratio is measured against.
        gesture_start_zoom: ZoomFactor,
        gesture_start_position: Point,
        /// Midpoint of the two contacts at pinch start, in canvas pixels.
        center_point: Point,
    },
    Inertia {
        velocity: Point,
    },
}

/// Drives [`GestureState`] from pointer, wheel and animation-frame input.
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    friction: f32,
    wheel_sensitivity: f32,
    /// Latest timestamp seen on any event.
    clock: Option<f64>,
    /// When the last gesture ended, for the settle window.
    ended_at: Option<f64>,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(DEFAULT_INERTIA_FRICTION, DEFAULT_WHEEL_SENSITIVITY)
    }
}

impl GestureController {
    #[must_use]
    pub fn new(friction: f32, wheel_sensitivity: f32) -> Self {
        Self {
            state: GestureState::Idle,
            friction,
            wheel_sensitivity,
            clock: None,
            ended_at: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.inertia_friction(), config.wheel_sensitivity())
    }

    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    #[must_use]
    pub fn is_inertia_active(&self) -> bool {
        matches!(self.state, GestureState::Inertia { .. })
    }

    /// True while a gesture runs and for a short settle window after it ends.
    #[must_use]
    pub fn is_gesture_active(&self, now_ms: f64) -> bool {
        if !matches!(self.state, GestureState::Idle) {
            return true;
        }
        self.ended_at
            .is_some_and(|ended| now_ms - ended < GESTURE_SETTLE_MS)
    }

    /// Drops any gesture, including inertia, without moving the photo.
    pub fn cancel(&mut self) {
        if !matches!(self.state, GestureState::Idle) {
            self.ended_at = self.clock;
        }
        self.state = GestureState::Idle;
    }

    /// Handles one pointer event. Returns the new transform when it changes.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        ctx: &GestureContext,
    ) -> Option<GestureUpdate> {
        match event.phase {
            PointerPhase::Down => {
                self.pointer_down(event, ctx);
                None
            }
            PointerPhase::Move => self.pointer_move(event, ctx),
            PointerPhase::Up => {
                self.pointer_up(event, true);
                None
            }
            PointerPhase::Cancel => {
                self.pointer_up(event, false);
                None
            }
        }
    }

    fn observe(&mut self, timestamp: Option<f64>) -> Option<f64> {
        let timestamp = timestamp.filter(|t| t.is_finite());
        if timestamp.is_some() {
            self.clock = timestamp;
        }
        timestamp
    }

    fn pointer_down(&mut self, event: &PointerEvent, ctx: &GestureContext) {
        let now = self.observe(event.timestamp_ms).or(self.clock).unwrap_or(0.0);
        if self.is_inertia_active() {
            self.state = GestureState::Idle;
        }

        let mapped: Vec<Point> = event
            .contacts
            .iter()
            .filter_map(|&contact| ctx.bounds.to_canvas(contact, ctx.canvas))
            .collect();

        match mapped.as_slice() {
            [a, b, ..] => {
                let distance = a.distance(*b);
                if !(distance.is_finite() && distance > 0.0) {
                    tracing::debug!("ignoring pinch start with zero contact distance");
                    return;
                }
                self.state = GestureState::Pinching {
                    initial_distance: distance,
                    initial_zoom: ctx.zoom,
                    gesture_start_zoom: ctx.zoom,
                    gesture_start_position: ctx.position,
                    center_point: a.midpoint(*b),
                };
            }
            [pos] => {
                self.state = GestureState::Dragging {
                    drag_start: *pos - ctx.position,
                    last_pos: *pos,
                    last_time: now,
                    velocity: Point::ZERO,
                    started_at: now,
                };
            }
            [] => {}
        }
    }

    fn pointer_move(&mut self, event: &PointerEvent, ctx: &GestureContext) -> Option<GestureUpdate> {
        let timestamp = self.observe(event.timestamp_ms);

        match &mut self.state {
            GestureState::Dragging {
                drag_start,
                last_pos,
                last_time,
                velocity,
                ..
            } => {
                let now = timestamp?;
                let pos = ctx.bounds.to_canvas(*event.contacts.first()?, ctx.canvas)?;

                #[allow(clippy::cast_possible_truncation)]
                let elapsed = (now - *last_time).max(1.0) as f32;
                let tick = VELOCITY_REFERENCE_TICK_MS as f32;
                *velocity = (pos - *last_pos) * (tick / elapsed);
                *last_pos = pos;
                *last_time = now;

                Some(GestureUpdate {
                    zoom: ctx.zoom,
                    position: pos - *drag_start,
                })
            }
            GestureState::Pinching {
                initial_distance,
                initial_zoom,
                gesture_start_zoom,
                gesture_start_position,
                center_point,
            } => {
                let [a, b, ..] = event.contacts.as_slice() else {
                    return None;
                };
                let a = ctx.bounds.to_canvas(*a, ctx.canvas)?;
                let b = ctx.bounds.to_canvas(*b, ctx.canvas)?;
                let distance = a.distance(b);
                if !distance.is_finite() {
                    return None;
                }

                let zoom = initial_zoom.scaled(distance / *initial_distance);
                let position = anchored_position(
                    *gesture_start_position,
                    *center_point,
                    ctx.canvas,
                    *gesture_start_zoom,
                    zoom,
                );
                Some(GestureUpdate { zoom, position })
            }
            GestureState::Idle | GestureState::Inertia { .. } => None,
        }
    }

    fn pointer_up(&mut self, event: &PointerEvent, allow_inertia: bool) {
        let now = self.observe(event.timestamp_ms).or(self.clock);

        match self.state {
            GestureState::Dragging {
                velocity,
                started_at,
                ..
            } => {
                let duration = now.map_or(0.0, |now| now - started_at);
                let speed = velocity.x.hypot(velocity.y);
                self.state = if allow_inertia
                    && duration > INERTIA_MIN_DRAG_MS
                    && speed > INERTIA_START_VELOCITY
                {
                    tracing::debug!(vx = velocity.x, vy = velocity.y, "inertia started");
                    GestureState::Inertia { velocity }
                } else {
                    GestureState::Idle
                };
                self.ended_at = now;
            }
            GestureState::Pinching { .. } => {
                if event.contacts.len() < 2 || !allow_inertia {
                    self.state = GestureState::Idle;
                    self.ended_at = now;
                }
            }
            GestureState::Inertia { .. } => {
                if !allow_inertia {
                    self.state = GestureState::Idle;
                }
            }
            GestureState::Idle => {}
        }
    }

    /// Advances inertia by one display frame.
    ///
    /// Returns the new offset while coasting; `None` once the photo comes to
    /// rest or when no inertia is running.
    pub fn tick_inertia(&mut self, position: Point, now_ms: f64) -> Option<Point> {
        let GestureState::Inertia { velocity } = &mut self.state else {
            return None;
        };

        *velocity = *velocity * self.friction;
        if velocity.x.abs() < INERTIA_REST_VELOCITY && velocity.y.abs() < INERTIA_REST_VELOCITY {
            self.state = GestureState::Idle;
            if now_ms.is_finite() {
                self.clock = Some(now_ms);
                self.ended_at = Some(now_ms);
            }
            return None;
        }
        Some(position + *velocity)
    }

    /// Zooms around the cursor. Ignored when the cursor is off the surface.
    pub fn wheel(&mut self, event: &WheelEvent, ctx: &GestureContext) -> Option<GestureUpdate> {
        if !event.over_surface || !event.delta_y.is_finite() {
            return None;
        }
        let anchor = ctx.bounds.to_canvas(event.cursor, ctx.canvas)?;
        let zoom = ctx
            .zoom
            .scaled((-event.delta_y * self.wheel_sensitivity).exp());
        let position = anchored_position(ctx.position, anchor, ctx.canvas, ctx.zoom, zoom);
        Some(GestureUpdate { zoom, position })
    }
}
