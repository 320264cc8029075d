// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;

use frame_lens::config;
use frame_lens::domain::editing::CanvasSize;
use frame_lens::domain::framing::{Point, ResolutionKind};
use frame_lens::error::Error;
use frame_lens::i18n::I18n;
use frame_lens::media::{self, ExportWorker};
use frame_lens::ui::image_editor::EditorSession;
use frame_lens::ui::notifications::{Notification, Severity};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
frame_lens: place a photo behind a frame and export the composite

USAGE:
  frame_lens --frame FILE --photo FILE [OPTIONS]

OPTIONS:
  --frame FILE           Frame image (transparent PNG or SVG)
  --photo FILE           Photo placed behind the frame
  -o, --output FILE      Output PNG path (default: suggested name)
  --size WxH             Export size, overrides --resolution
  --resolution KEY       hd, 2k, fullhd, 4k, 5k, original or current
  --zoom FACTOR          Photo zoom (0.1 to 10, default: auto-fit)
  --offset X,Y           Photo offset from the canvas center, in canvas px
  --brightness PERCENT   50 to 150 (default 100)
  --contrast PERCENT     50 to 150 (default 100)
  --no-frame             Hide the frame overlay (still clips the photo)
  --list-resolutions     Print the available output sizes and exit
  --lang LOCALE          Message language (en-US, fr)
  --config-dir DIR       Directory holding settings.toml
  -h, --help             Print this help
";

#[derive(Debug)]
struct Flags {
    frame: Option<PathBuf>,
    photo: Option<PathBuf>,
    output: Option<PathBuf>,
    size: Option<CanvasSize>,
    resolution: Option<ResolutionKind>,
    zoom: Option<f32>,
    offset: Option<Point>,
    brightness: Option<i32>,
    contrast: Option<i32>,
    no_frame: bool,
    list_resolutions: bool,
    lang: Option<String>,
    config_dir: Option<String>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        frame: args.opt_value_from_str("--frame")?,
        photo: args.opt_value_from_str("--photo")?,
        output: args.opt_value_from_str(["-o", "--output"])?,
        size: args.opt_value_from_fn("--size", parse_size)?,
        resolution: args.opt_value_from_fn("--resolution", parse_resolution)?,
        zoom: args.opt_value_from_str("--zoom")?,
        offset: args.opt_value_from_fn("--offset", parse_offset)?,
        brightness: args.opt_value_from_str("--brightness")?,
        contrast: args.opt_value_from_str("--contrast")?,
        no_frame: args.contains("--no-frame"),
        list_resolutions: args.contains("--list-resolutions"),
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };

    let remaining = args.finish();
    if let Some(extra) = remaining.first() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected argument {}", extra.to_string_lossy()),
        });
    }
    Ok(Some(flags))
}

fn parse_size(value: &str) -> Result<CanvasSize, String> {
    let (width, height) = value
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| format!("expected WxH, got {value}"))?;
    let width: u32 = width.trim().parse().map_err(|_| format!("bad width in {value}"))?;
    let height: u32 = height.trim().parse().map_err(|_| format!("bad height in {value}"))?;
    if width == 0 || height == 0 {
        return Err(format!("size must be positive, got {value}"));
    }
    Ok(CanvasSize::new(width, height))
}

fn parse_resolution(value: &str) -> Result<ResolutionKind, String> {
    ResolutionKind::from_key(value).ok_or_else(|| format!("unknown resolution {value}"))
}

fn parse_offset(value: &str) -> Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {value}"))?;
    let x: f32 = x.trim().parse().map_err(|_| format!("bad x in {value}"))?;
    let y: f32 = y.trim().parse().map_err(|_| format!("bad y in {value}"))?;
    Ok(Point::new(x, y))
}

fn report(i18n: &I18n, notification: &Notification) {
    let text = i18n.notification_text(notification);
    match notification.severity() {
        Severity::Success | Severity::Info => println!("{text}"),
        Severity::Warning | Severity::Error => eprintln!("{text}"),
    }
}

fn fail(i18n: &I18n, err: &Error) -> ExitCode {
    report(i18n, &Notification::from_error(err));
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(?flags, "parsed arguments");

    config::paths::init_cli_override(flags.config_dir.clone());
    let (config, warning) = config::load();
    let i18n = I18n::new(flags.lang.clone(), &config);
    if let Some(key) = warning {
        report(&i18n, &Notification::warning(key));
    }

    let mut editor = match &flags.frame {
        Some(path) => match media::load_from_path(path) {
            Ok(frame) => EditorSession::with_frame(frame, &config),
            Err(err) => return fail(&i18n, &err),
        },
        None => EditorSession::new(&config),
    };

    if let Some(path) = &flags.photo {
        match media::load_from_path(path) {
            Ok(photo) => {
                editor.upload_background(photo);
            }
            Err(err) => return fail(&i18n, &err),
        }
    }

    if flags.list_resolutions {
        for resolution in editor.valid_resolutions() {
            let name = i18n.tr(&format!("resolution-{}", resolution.kind.key()));
            let note = if resolution.frame_upscaled {
                format!(" [{}]", i18n.tr("resolution-frame-upscaled"))
            } else {
                String::new()
            };
            println!(
                "{:<9} {name} ({}×{}){note}",
                resolution.kind.key(),
                resolution.width,
                resolution.height
            );
        }
        return ExitCode::SUCCESS;
    }

    if let Some(kind) = flags.resolution {
        let Some(resolution) = editor
            .valid_resolutions()
            .into_iter()
            .find(|candidate| candidate.kind == kind)
        else {
            eprintln!("resolution {} is not available for these images", kind.key());
            return ExitCode::from(2);
        };
        editor.select_resolution(&resolution);
    }
    if let Some(zoom) = flags.zoom {
        editor.set_zoom(zoom);
    }
    if let Some(offset) = flags.offset {
        editor.set_position(offset);
    }
    if let Some(brightness) = flags.brightness {
        editor.set_brightness(brightness);
    }
    if let Some(contrast) = flags.contrast {
        editor.set_contrast(contrast);
    }
    if flags.no_frame {
        editor.toggle_frame_visibility();
    }

    let target = flags.size.unwrap_or(editor.session().canvas_size());
    let Some(worker) = ExportWorker::current() else {
        return fail(&i18n, &Error::Io("no async runtime available".into()));
    };
    let result = match editor.export_in_background(&worker, target) {
        Ok(ticket) => editor.finish_export(ticket.wait().await),
        Err(err) => Err(err),
    };

    let exit = match result {
        Ok(image) => {
            let path = flags
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(editor.suggested_filename(&image)));
            match image.save_to_file(&path) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    editor.notifications_mut().push(Notification::from_error(&err));
                    ExitCode::FAILURE
                }
            }
        }
        Err(_) => ExitCode::FAILURE,
    };

    for notification in editor.drain_notifications() {
        report(&i18n, &notification);
    }
    exit
}
