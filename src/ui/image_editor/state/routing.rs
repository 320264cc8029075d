// SPDX-License-Identifier: MPL-2.0
//! Message routing helpers that keep the editor facade slim.

use crate::ui::image_editor::{CanvasMessage, ControlMessage, EditorSession, Event};

impl EditorSession {
    pub(crate) fn handle_control_message(&mut self, message: ControlMessage) -> Event {
        match message {
            ControlMessage::ZoomChanged(zoom) => self.set_zoom(zoom),
            ControlMessage::BrightnessChanged(value) => self.set_brightness(value),
            ControlMessage::ContrastChanged(value) => self.set_contrast(value),
            ControlMessage::SelectResolution(resolution) => self.select_resolution(&resolution),
            ControlMessage::Reset => self.reset(),
            ControlMessage::AutoFit => self.auto_fit(),
            ControlMessage::ToggleFrame => self.toggle_frame_visibility(),
            ControlMessage::ClearBackground => self.clear_background(),
            ControlMessage::Export(target) => match self.export_image(target) {
                Ok(image) => {
                    let filename = self.suggested_filename(&image);
                    Event::ExportReady { image, filename }
                }
                Err(_) => Event::Notified,
            },
        }
    }

    pub(crate) fn handle_canvas_message(&mut self, message: CanvasMessage) -> Event {
        match message {
            CanvasMessage::Pointer { event, bounds } => self.handle_pointer(&event, bounds),
            CanvasMessage::Wheel { event, bounds } => self.handle_wheel(&event, bounds),
            CanvasMessage::SliderKey { control, key } => self.handle_slider_key(control, key),
        }
    }
}
