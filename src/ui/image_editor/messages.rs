// SPDX-License-Identifier: MPL-2.0
//! Editor message/event types re-exported by the facade.

use crate::domain::editing::CanvasSize;
use crate::domain::framing::Resolution;
use crate::media::{ExportedImage, ImageUpload};
use crate::ui::state::{PointerEvent, SliderControl, SliderKey, SurfaceBounds, WheelEvent};

/// Control panel messages.
#[derive(Debug, Clone)]
pub enum ControlMessage {
    ZoomChanged(f32),
    /// Brightness slider changed (live preview)
    BrightnessChanged(i32),
    /// Contrast slider changed (live preview)
    ContrastChanged(i32),
    SelectResolution(Resolution),
    /// Reset adjustments and refit the photo
    Reset,
    AutoFit,
    ToggleFrame,
    ClearBackground,
    /// Render and encode at the given size
    Export(CanvasSize),
}

/// Preview surface interaction messages.
#[derive(Debug, Clone)]
pub enum CanvasMessage {
    Pointer {
        event: PointerEvent,
        bounds: SurfaceBounds,
    },
    Wheel {
        event: WheelEvent,
        bounds: SurfaceBounds,
    },
    /// Keyboard stepping on a focused slider
    SliderKey {
        control: SliderControl,
        key: SliderKey,
    },
}

/// Messages handled by [`EditorSession::update`](super::EditorSession::update).
#[derive(Debug, Clone)]
pub enum Message {
    Control(ControlMessage),
    Canvas(CanvasMessage),
    /// Bytes picked by the user for the background photo
    UploadBackground(ImageUpload),
}

impl From<ControlMessage> for Message {
    fn from(message: ControlMessage) -> Self {
        Message::Control(message)
    }
}

impl From<CanvasMessage> for Message {
    fn from(message: CanvasMessage) -> Self {
        Message::Canvas(message)
    }
}

/// Events propagated to the host for side effects.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// State changed; render on the next display refresh
    RedrawRequested,
    /// A notification was queued; drain it from the session
    Notified,
    /// An export finished and is ready to hand to the download collaborator
    ExportReady {
        image: ExportedImage,
        filename: String,
    },
}

impl Event {
    /// True unless the event is [`Event::None`].
    #[must_use]
    pub fn is_some(&self) -> bool {
        !matches!(self, Event::None)
    }
}
