// SPDX-License-Identifier: MPL-2.0
//! Framing editor: a photo positioned behind a fixed frame.
//!
//! This module follows a "state down, messages up" pattern. [`EditorSession`]
//! owns the editing [`Session`] and the interaction helpers around it. Input
//! handlers only mutate state and schedule a redraw; the host calls
//! [`EditorSession::on_animation_frame`] once per display refresh to draw.

use tiny_skia::Pixmap;

use crate::config::Config;
use crate::domain::editing::CanvasSize;
use crate::domain::framing::{valid_resolutions, Point, Resolution};
use crate::error::{Error, ExportError};
use crate::media::{
    decode_upload, export_scene, CompositeRenderer, ExportTicket, ExportWorker, ExportedImage,
    ImageUpload, RasterImage, RenderMode,
};
use crate::ui::notifications::{Manager, Notification};
use crate::ui::state::{
    GestureContext, GestureController, GestureState, PointerEvent, RedrawScheduler, SliderControl,
    SliderKey, SliderSpec, SurfaceBounds, WheelEvent,
};

mod messages;
mod state;

pub use self::state::Session;
pub use messages::{CanvasMessage, ControlMessage, Event, Message};

/// The live editor: session values plus gesture, redraw and notification state.
pub struct EditorSession {
    session: Session,
    frame_margin: f32,
    filename_prefix: String,
    gestures: GestureController,
    redraw: RedrawScheduler,
    renderer: CompositeRenderer,
    notifications: Manager,
    /// Set while an export is running.
    is_processing: bool,
    /// Whether the last preview skipped filters because of a gesture.
    filters_deferred: bool,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("session", &self.session)
            .field("gesture", self.gestures.state())
            .field("redraw_pending", &self.redraw.is_pending())
            .field("is_processing", &self.is_processing)
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    /// Creates a session without a frame.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::build(None, config)
    }

    /// Creates a session around the fixed `frame`.
    #[must_use]
    pub fn with_frame(frame: RasterImage, config: &Config) -> Self {
        Self::build(Some(frame), config)
    }

    fn build(frame: Option<RasterImage>, config: &Config) -> Self {
        let session = Session::new(frame, config.default_canvas_dimension());
        tracing::debug!(
            width = session.canvas_size().width(),
            height = session.canvas_size().height(),
            has_frame = session.frame().is_some(),
            "editor session created"
        );
        Self {
            session,
            frame_margin: config.frame_margin(),
            filename_prefix: config.filename_prefix().to_string(),
            gestures: GestureController::from_config(config),
            redraw: RedrawScheduler::new(),
            renderer: CompositeRenderer::new(),
            notifications: Manager::new(),
            is_processing: false,
            filters_deferred: false,
        }
    }

    /// Routes a message to the matching command.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Control(message) => self.handle_control_message(message),
            Message::Canvas(message) => self.handle_canvas_message(message),
            Message::UploadBackground(upload) => self.upload_background_bytes(&upload),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn frame_margin(&self) -> f32 {
        self.frame_margin
    }

    #[must_use]
    pub fn gesture_state(&self) -> &GestureState {
        self.gestures.state()
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.redraw.is_disposed()
    }

    #[must_use]
    pub fn has_pending_redraw(&self) -> bool {
        self.redraw.is_pending()
    }

    /// True while the host should keep delivering animation frames.
    #[must_use]
    pub fn needs_animation_frame(&self) -> bool {
        !self.is_disposed()
            && (self.redraw.is_pending()
                || self.gestures.is_inertia_active()
                || self.filters_deferred)
    }

    #[must_use]
    pub fn notifications(&self) -> &Manager {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Manager {
        &mut self.notifications
    }

    /// Takes every queued notification, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Output sizes available for the current photo and frame.
    #[must_use]
    pub fn valid_resolutions(&self) -> Vec<Resolution> {
        valid_resolutions(
            self.session.background().map(RasterImage::dimensions),
            self.session.frame().map(RasterImage::dimensions),
            self.session.canvas_size(),
        )
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Replaces the photo, recenters it and fits it to the frame.
    pub fn upload_background(&mut self, background: RasterImage) -> Event {
        tracing::info!(
            width = background.width(),
            height = background.height(),
            "background loaded"
        );
        self.gestures.cancel();
        self.renderer.clear_cache();
        self.notifications.clear_upload_errors();
        let next = self.snapshot().with_background(background, self.frame_margin);
        self.commit(next)
    }

    /// Validates and decodes an upload, then loads it as the photo.
    ///
    /// A rejected upload leaves the current photo in place and queues an
    /// error notification.
    pub fn upload_background_bytes(&mut self, upload: &ImageUpload) -> Event {
        self.is_processing = true;
        let decoded = decode_upload(upload);
        self.is_processing = false;

        match decoded {
            Ok(image) => self.upload_background(image),
            Err(err) => {
                tracing::warn!(error = %err, "upload rejected");
                self.notify(Notification::from_error(&Error::Image(err)))
            }
        }
    }

    /// Removes the photo and restores zoom and offset.
    pub fn clear_background(&mut self) -> Event {
        self.gestures.cancel();
        self.renderer.clear_cache();
        let next = self.snapshot().without_background();
        self.commit(next);
        self.notify(Notification::info("notification-background-cleared"))
    }

    pub fn set_zoom(&mut self, zoom: f32) -> Event {
        let next = self.snapshot().with_zoom(zoom);
        self.commit(next)
    }

    pub fn set_brightness(&mut self, value: i32) -> Event {
        let next = self.snapshot().with_brightness(value);
        self.commit(next)
    }

    pub fn set_contrast(&mut self, value: i32) -> Event {
        let next = self.snapshot().with_contrast(value);
        self.commit(next)
    }

    /// Moves the photo's center to `position`, relative to the canvas center.
    pub fn set_position(&mut self, position: Point) -> Event {
        let next = self.snapshot().with_position(position);
        self.commit(next)
    }

    /// Switches the canvas to `resolution`. Adjustments are kept.
    pub fn select_resolution(&mut self, resolution: &Resolution) -> Event {
        if self.session.canvas_size() == resolution.canvas_size() {
            return Event::None;
        }
        tracing::debug!(resolution = %resolution, "resolution selected");
        let next = self.snapshot().with_canvas_size(resolution.canvas_size());
        self.commit(next)
    }

    /// Restores default adjustments and refits the photo.
    pub fn reset(&mut self) -> Event {
        self.gestures.cancel();
        let next = self.snapshot().reset(self.frame_margin);
        self.commit(next)
    }

    /// Fits the photo to the frame, keeping color adjustments.
    pub fn auto_fit(&mut self) -> Event {
        if !self.session.is_paired() {
            return Event::None;
        }
        self.gestures.cancel();
        let next = self.snapshot().auto_fitted(self.frame_margin);
        self.commit(next)
    }

    pub fn toggle_frame_visibility(&mut self) -> Event {
        let show = !self.session.show_frame();
        let next = self.snapshot().with_frame_visibility(show);
        self.commit(next)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feeds a pointer or touch event to the gesture controller.
    pub fn handle_pointer(&mut self, event: &PointerEvent, bounds: SurfaceBounds) -> Event {
        if !self.session.has_background() || self.is_disposed() {
            return Event::None;
        }
        let ctx = self.gesture_context(bounds);
        match self.gestures.handle_pointer(event, &ctx) {
            Some(update) => {
                let next = self.snapshot().with_transform(update.zoom, update.position);
                self.commit(next)
            }
            None => Event::None,
        }
    }

    /// Zooms around the cursor.
    pub fn handle_wheel(&mut self, event: &WheelEvent, bounds: SurfaceBounds) -> Event {
        if !self.session.has_background() || self.is_disposed() {
            return Event::None;
        }
        let ctx = self.gesture_context(bounds);
        match self.gestures.wheel(event, &ctx) {
            Some(update) => {
                let next = self.snapshot().with_transform(update.zoom, update.position);
                self.commit(next)
            }
            None => Event::None,
        }
    }

    /// Steps a focused slider.
    pub fn handle_slider_key(&mut self, control: SliderControl, key: SliderKey) -> Event {
        if !self.session.has_background() {
            return Event::None;
        }
        let spec = SliderSpec::for_control(control);
        match control {
            SliderControl::Zoom => {
                let value = spec.apply_key(self.session.zoom().value(), key);
                self.set_zoom(value)
            }
            #[allow(clippy::cast_possible_truncation)]
            SliderControl::Brightness => {
                let current = self.session.brightness().value() as f32;
                self.set_brightness(spec.apply_key(current, key).round() as i32)
            }
            #[allow(clippy::cast_possible_truncation)]
            SliderControl::Contrast => {
                let current = self.session.contrast().value() as f32;
                self.set_contrast(spec.apply_key(current, key).round() as i32)
            }
        }
    }

    /// Display refresh callback.
    ///
    /// Advances inertia, then draws onto `surface` if a redraw is owed.
    /// Returns whether anything was drawn.
    pub fn on_animation_frame(&mut self, now_ms: f64, surface: &mut Pixmap) -> bool {
        if self.is_disposed() {
            return false;
        }

        if let Some(position) = self.gestures.tick_inertia(self.session.position(), now_ms) {
            let next = self.snapshot().with_position(position);
            self.commit(next);
        }

        let gesture_active = self.gestures.is_gesture_active(now_ms);
        if self.filters_deferred && !gesture_active {
            self.redraw.request();
        }
        if !self.redraw.take_pending() {
            return false;
        }

        let scene = self.session.scene(self.frame_margin);
        self.renderer
            .render(surface, &scene, RenderMode::Preview { gesture_active });
        self.filters_deferred = gesture_active;
        true
    }

    /// Stops pending redraws and inertia. Later frames draw nothing.
    pub fn dispose(&mut self) {
        tracing::debug!("editor session disposed");
        self.gestures.cancel();
        self.redraw.dispose();
        self.renderer.clear_cache();
        self.filters_deferred = false;
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Renders and encodes the composite at `target`, independent of the
    /// preview canvas size.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NothingToExport`] without images, or a surface
    /// or encoding failure. An error notification is queued either way.
    pub fn export_image(&mut self, target: CanvasSize) -> Result<ExportedImage, ExportError> {
        self.is_processing = true;
        let result = export_scene(&self.session.scene(self.frame_margin), target);
        self.finish_export(result)
    }

    /// Submits the export to `worker`.
    ///
    /// Pass the ticket's result to [`Self::finish_export`] once it resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NothingToExport`] without images or
    /// [`ExportError::Busy`] while another export runs.
    pub fn export_in_background(
        &mut self,
        worker: &ExportWorker,
        target: CanvasSize,
    ) -> Result<ExportTicket, ExportError> {
        let submitted = if self.session.has_background() || self.session.frame().is_some() {
            worker.submit(self.session.scene(self.frame_margin), target)
        } else {
            Err(ExportError::NothingToExport)
        };
        match submitted {
            Ok(ticket) => {
                self.is_processing = true;
                Ok(ticket)
            }
            Err(err) => {
                self.notify(Notification::from_error(&Error::Export(err.clone())));
                Err(err)
            }
        }
    }

    /// Records the outcome of an export and reports it.
    ///
    /// # Errors
    ///
    /// Passes `result`'s error through after queuing its notification.
    pub fn finish_export(
        &mut self,
        result: Result<ExportedImage, ExportError>,
    ) -> Result<ExportedImage, ExportError> {
        self.is_processing = false;
        match &result {
            Ok(image) => {
                tracing::info!(width = image.width, height = image.height, "export finished");
                self.notify(
                    Notification::success("notification-export-success")
                        .with_arg("width", image.width.to_string())
                        .with_arg("height", image.height.to_string()),
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                self.notify(Notification::from_error(&Error::Export(err.clone())));
            }
        }
        result
    }

    /// Suggested file name for an export.
    #[must_use]
    pub fn suggested_filename(&self, image: &ExportedImage) -> String {
        image.suggested_filename(&self.filename_prefix)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn snapshot(&mut self) -> Session {
        self.session.clone()
    }

    fn commit(&mut self, next: Session) -> Event {
        self.session = next;
        if self.redraw.request() {
            Event::RedrawRequested
        } else {
            Event::None
        }
    }

    fn notify(&mut self, notification: Notification) -> Event {
        self.notifications.push(notification);
        Event::Notified
    }

    fn gesture_context(&self, bounds: SurfaceBounds) -> GestureContext {
        GestureContext {
            zoom: self.session.zoom(),
            position: self.session.position(),
            canvas: self.session.canvas_size(),
            bounds,
        }
    }
}

#[cfg(test)]
mod tests;
