// SPDX-License-Identifier: MPL-2.0

use super::*;
use crate::domain::framing::{Point, ResolutionKind};
use crate::test_utils::assert_abs_diff_eq;
use crate::ui::notifications::Severity;
use crate::ui::state::PointerPhase;
use tiny_skia::Color;

fn solid(width: u32, height: u32, color: Color) -> RasterImage {
    let mut pixmap = Pixmap::new(width, height).expect("pixmap");
    pixmap.fill(color);
    RasterImage::from_pixmap(pixmap)
}

fn framed_editor() -> EditorSession {
    EditorSession::with_frame(
        solid(100, 50, Color::TRANSPARENT),
        &Config::default(),
    )
}

fn loaded_editor() -> EditorSession {
    let mut editor = framed_editor();
    editor.upload_background(solid(400, 400, Color::from_rgba8(200, 40, 40, 255)));
    editor
}

fn bounds(editor: &EditorSession) -> SurfaceBounds {
    SurfaceBounds::identity(editor.session().canvas_size())
}

fn pointer(phase: PointerPhase, contacts: &[(f32, f32)], t: f64) -> PointerEvent {
    PointerEvent::new(
        phase,
        contacts.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        Some(t),
    )
}

fn surface() -> Pixmap {
    Pixmap::new(200, 100).expect("surface")
}

#[test]
fn new_editor_takes_frame_aspect_ratio() {
    let editor = framed_editor();
    assert_eq!(editor.session().canvas_size(), CanvasSize::new(2000, 1000));
    assert!(!editor.session().has_background());
    assert!(!editor.is_processing());
    assert!(editor.valid_resolutions().is_empty());
}

#[test]
fn upload_requests_a_single_coalesced_redraw() {
    let mut editor = framed_editor();
    let event = editor.upload_background(solid(400, 400, Color::BLACK));
    assert!(matches!(event, Event::RedrawRequested));

    assert!(matches!(editor.set_brightness(120), Event::None));
    assert!(matches!(editor.set_contrast(90), Event::None));
    assert!(editor.has_pending_redraw());

    let mut surface = surface();
    assert!(editor.on_animation_frame(0.0, &mut surface));
    assert!(!editor.on_animation_frame(16.0, &mut surface));
    assert!(matches!(editor.set_zoom(2.0), Event::RedrawRequested));
}

#[test]
fn upload_auto_fits_and_recenters() {
    let mut editor = framed_editor();
    editor.upload_background(solid(400, 400, Color::BLACK));
    let rect = editor.session().frame_rect(editor.frame_margin());
    let expected = (rect.width / 400.0).max(rect.height / 400.0) * 1.05;
    assert_abs_diff_eq!(editor.session().zoom().value(), expected, epsilon = 1e-4);
    assert_eq!(editor.session().position(), Point::ZERO);
}

#[test]
fn rendered_frame_shows_photo_inside_frame_only() {
    let mut editor = loaded_editor();
    let mut surface = surface();
    assert!(editor.on_animation_frame(0.0, &mut surface));

    let center = surface.pixel(100, 50).expect("pixel");
    assert_eq!(center.alpha(), 255);
    assert!(center.red() > 150);

    let corner = surface.pixel(1, 1).expect("pixel");
    assert_eq!(corner.alpha(), 0);
}

#[test]
fn select_resolution_keeps_zoom_and_position() {
    let mut editor = loaded_editor();
    editor.set_zoom(1.5);
    editor.handle_pointer(&pointer(PointerPhase::Down, &[(10.0, 10.0)], 0.0), bounds(&editor));
    editor.handle_pointer(&pointer(PointerPhase::Move, &[(30.0, 5.0)], 16.0), bounds(&editor));
    editor.handle_pointer(&pointer(PointerPhase::Up, &[], 20.0), bounds(&editor));
    let zoom = editor.session().zoom();
    let position = editor.session().position();

    let original = editor
        .valid_resolutions()
        .into_iter()
        .find(|r| r.kind == ResolutionKind::Original)
        .expect("frame size is listed");
    editor.select_resolution(&original);

    assert_eq!(editor.session().canvas_size(), CanvasSize::new(100, 50));
    assert_eq!(editor.session().zoom(), zoom);
    assert_eq!(editor.session().position(), position);
}

#[test]
fn selecting_the_current_size_is_a_no_op() {
    let mut editor = loaded_editor();
    let mut surface = surface();
    editor.on_animation_frame(0.0, &mut surface);

    let current = Resolution {
        kind: ResolutionKind::Current,
        width: 2000,
        height: 1000,
        label: "Current (2000×1000)".into(),
        frame_upscaled: true,
    };
    assert!(matches!(editor.select_resolution(&current), Event::None));
    assert!(!editor.has_pending_redraw());
}

#[test]
fn pointer_input_is_ignored_without_background() {
    let mut editor = framed_editor();
    let b = bounds(&editor);
    editor.handle_pointer(&pointer(PointerPhase::Down, &[(10.0, 10.0)], 0.0), b);
    let event = editor.handle_pointer(&pointer(PointerPhase::Move, &[(50.0, 10.0)], 16.0), b);
    assert!(matches!(event, Event::None));
    assert_eq!(editor.session().position(), Point::ZERO);
    assert!(matches!(editor.gesture_state(), GestureState::Idle));
}

#[test]
fn drag_moves_photo_by_pointer_delta() {
    let mut editor = loaded_editor();
    let b = bounds(&editor);
    editor.handle_pointer(&pointer(PointerPhase::Down, &[(100.0, 100.0)], 0.0), b);
    editor.handle_pointer(&pointer(PointerPhase::Move, &[(140.0, 90.0)], 16.0), b);
    assert_eq!(editor.session().position(), Point::new(40.0, -10.0));
}

#[test]
fn flick_coasts_then_stops() {
    let mut editor = loaded_editor();
    let b = bounds(&editor);
    editor.handle_pointer(&pointer(PointerPhase::Down, &[(100.0, 100.0)], 0.0), b);
    editor.handle_pointer(&pointer(PointerPhase::Move, &[(140.0, 100.0)], 40.0), b);
    editor.handle_pointer(&pointer(PointerPhase::Move, &[(180.0, 100.0)], 80.0), b);
    editor.handle_pointer(&pointer(PointerPhase::Up, &[], 80.0), b);
    assert!(matches!(editor.gesture_state(), GestureState::Inertia { .. }));

    let mut surface = surface();
    let mut last_x = editor.session().position().x;
    let mut now = 80.0;
    let mut frames = 0;
    while matches!(editor.gesture_state(), GestureState::Inertia { .. }) {
        now += 16.0;
        frames += 1;
        editor.on_animation_frame(now, &mut surface);
        let x = editor.session().position().x;
        assert!(x >= last_x);
        last_x = x;
        assert!(frames < 200, "inertia did not settle");
    }
    assert!(last_x > 80.0);
}

#[test]
fn filters_are_restored_after_gesture_settles() {
    let mut editor = loaded_editor();
    editor.set_brightness(140);
    let b = bounds(&editor);
    editor.handle_pointer(&pointer(PointerPhase::Down, &[(100.0, 100.0)], 0.0), b);
    editor.handle_pointer(&pointer(PointerPhase::Move, &[(101.0, 100.0)], 10.0), b);
    editor.handle_pointer(&pointer(PointerPhase::Up, &[], 16.0), b);

    let mut surface = surface();
    assert!(editor.on_animation_frame(20.0, &mut surface));
    let unfiltered = surface.pixel(100, 50).expect("pixel");
    assert!(editor.needs_animation_frame());

    assert!(editor.on_animation_frame(200.0, &mut surface));
    let filtered = surface.pixel(100, 50).expect("pixel");
    assert!(filtered.red() > unfiltered.red());
    assert!(!editor.on_animation_frame(216.0, &mut surface));
    assert!(!editor.needs_animation_frame());
}

#[test]
fn wheel_zooms_only_over_surface() {
    let mut editor = loaded_editor();
    let zoom = editor.session().zoom().value();
    let b = bounds(&editor);

    let outside = WheelEvent {
        delta_y: -100.0,
        cursor: Point::new(1000.0, 500.0),
        over_surface: false,
    };
    assert!(matches!(editor.handle_wheel(&outside, b), Event::None));

    let inside = WheelEvent {
        over_surface: true,
        ..outside
    };
    editor.handle_wheel(&inside, b);
    assert_abs_diff_eq!(
        editor.session().zoom().value(),
        zoom * 0.1f32.exp(),
        epsilon = 1e-4
    );
    assert!(editor.session().position().x.abs() < 1e-3);
}

#[test]
fn slider_keys_step_and_jump() {
    let mut editor = loaded_editor();
    editor.handle_slider_key(SliderControl::Brightness, SliderKey::ArrowUp);
    assert_eq!(editor.session().brightness().value(), 101);
    editor.handle_slider_key(SliderControl::Contrast, SliderKey::Home);
    assert_eq!(editor.session().contrast().value(), 50);
    editor.handle_slider_key(SliderControl::Zoom, SliderKey::End);
    assert!(editor.session().zoom().is_max());
}

#[test]
fn slider_keys_need_a_background() {
    let mut editor = framed_editor();
    editor.handle_slider_key(SliderControl::Brightness, SliderKey::End);
    assert_eq!(editor.session().brightness().value(), 100);
}

#[test]
fn rejected_upload_keeps_existing_photo() {
    let mut editor = loaded_editor();
    let before = editor.session().background().cloned().expect("photo");

    let upload = ImageUpload::new(b"%PDF-1.4".to_vec(), Some("application/pdf".into()));
    let event = editor.upload_background_bytes(&upload);

    assert!(matches!(event, Event::Notified));
    let after = editor.session().background().expect("photo kept");
    assert!(after.same_pixels(&before));
    assert!(!editor.is_processing());

    let notifications = editor.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity(), Severity::Error);
    assert_eq!(notifications[0].message_key(), "error-upload-invalid-type");
}

#[test]
fn successful_upload_clears_upload_errors() {
    let mut editor = framed_editor();
    editor.upload_background_bytes(&ImageUpload::new(vec![1, 2, 3], None));
    assert_eq!(editor.notifications().len(), 1);

    editor.upload_background(solid(10, 10, Color::WHITE));
    assert!(editor.notifications().is_empty());
}

#[test]
fn clear_background_resets_and_notifies() {
    let mut editor = loaded_editor();
    editor.set_zoom(3.0);
    let event = editor.clear_background();
    assert!(matches!(event, Event::Notified));
    assert!(!editor.session().has_background());
    assert_abs_diff_eq!(editor.session().zoom().value(), 1.0);

    let notifications = editor.drain_notifications();
    assert_eq!(notifications[0].severity(), Severity::Info);
    assert_eq!(notifications[0].message_key(), "notification-background-cleared");
}

#[test]
fn reset_restores_defaults_and_refits() {
    let mut editor = loaded_editor();
    let fitted = editor.session().zoom();
    editor.set_zoom(7.0);
    editor.set_brightness(60);
    editor.set_contrast(130);
    editor.reset();

    assert_eq!(editor.session().zoom(), fitted);
    assert_eq!(editor.session().position(), Point::ZERO);
    assert!(editor.session().brightness().is_neutral());
    assert!(editor.session().contrast().is_neutral());
}

#[test]
fn auto_fit_needs_both_images() {
    let mut editor = EditorSession::new(&Config::default());
    editor.upload_background(solid(10, 10, Color::WHITE));
    assert!(matches!(editor.auto_fit(), Event::None));
}

#[test]
fn toggle_frame_visibility_flips_flag() {
    let mut editor = loaded_editor();
    editor.toggle_frame_visibility();
    assert!(!editor.session().show_frame());
    editor.toggle_frame_visibility();
    assert!(editor.session().show_frame());
}

#[test]
fn export_without_images_is_rejected() {
    let mut editor = EditorSession::new(&Config::default());
    let result = editor.export_image(CanvasSize::new(100, 100));
    assert_eq!(result, Err(ExportError::NothingToExport));
    assert!(!editor.is_processing());

    let notifications = editor.drain_notifications();
    assert_eq!(notifications[0].message_key(), "error-export-nothing");
}

#[test]
fn export_renders_at_target_size() {
    let mut editor = loaded_editor();
    let exported = editor.export_image(CanvasSize::new(300, 150)).expect("export");
    assert_eq!((exported.width, exported.height), (300, 150));
    assert!(!editor.is_processing());
    assert_eq!(editor.suggested_filename(&exported), "framed_photo_300x150.png");

    let notifications = editor.drain_notifications();
    assert_eq!(notifications[0].severity(), Severity::Success);
    assert_eq!(notifications[0].message_key(), "notification-export-success");
}

#[test]
fn export_message_produces_export_ready() {
    let mut editor = loaded_editor();
    let event = editor.update(Message::Control(ControlMessage::Export(CanvasSize::new(
        64, 32,
    ))));
    match event {
        Event::ExportReady { image, filename } => {
            assert_eq!((image.width, image.height), (64, 32));
            assert_eq!(filename, "framed_photo_64x32.png");
        }
        other => panic!("expected ExportReady, got {other:?}"),
    }
}

#[test]
fn messages_route_to_commands() {
    let mut editor = loaded_editor();
    editor.update(ControlMessage::BrightnessChanged(130).into());
    editor.update(ControlMessage::ToggleFrame.into());
    editor.update(
        CanvasMessage::SliderKey {
            control: SliderControl::Contrast,
            key: SliderKey::ArrowDown,
        }
        .into(),
    );
    assert_eq!(editor.session().brightness().value(), 130);
    assert!(!editor.session().show_frame());
    assert_eq!(editor.session().contrast().value(), 99);
}

#[test]
fn dispose_stops_redraws_and_inertia() {
    let mut editor = loaded_editor();
    let b = bounds(&editor);
    editor.handle_pointer(&pointer(PointerPhase::Down, &[(100.0, 100.0)], 0.0), b);
    editor.handle_pointer(&pointer(PointerPhase::Move, &[(180.0, 100.0)], 60.0), b);
    editor.handle_pointer(&pointer(PointerPhase::Move, &[(260.0, 100.0)], 80.0), b);
    editor.handle_pointer(&pointer(PointerPhase::Up, &[], 80.0), b);

    editor.dispose();
    assert!(editor.is_disposed());
    assert!(matches!(editor.gesture_state(), GestureState::Idle));

    let position = editor.session().position();
    let mut surface = surface();
    assert!(!editor.on_animation_frame(96.0, &mut surface));
    assert_eq!(editor.session().position(), position);
    assert!(matches!(editor.set_zoom(2.0), Event::None));
    assert!(!editor.needs_animation_frame());
}

#[tokio::test]
async fn background_export_reports_through_finish() {
    let mut editor = loaded_editor();
    let worker = ExportWorker::current().expect("inside runtime");

    let ticket = editor
        .export_in_background(&worker, CanvasSize::new(40, 20))
        .expect("submitted");
    assert!(editor.is_processing());

    let exported = editor.finish_export(ticket.wait().await).expect("export");
    assert_eq!((exported.width, exported.height), (40, 20));
    assert!(!editor.is_processing());
    assert!(!worker.is_busy());
}

#[tokio::test]
async fn background_export_without_images_is_rejected() {
    let mut editor = EditorSession::new(&Config::default());
    let worker = ExportWorker::current().expect("inside runtime");
    let result = editor.export_in_background(&worker, CanvasSize::new(40, 20));
    assert!(matches!(result, Err(ExportError::NothingToExport)));
    assert!(!editor.is_processing());
    assert_eq!(editor.notifications().len(), 1);
}
