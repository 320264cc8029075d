// SPDX-License-Identifier: MPL-2.0
//! `frame_lens` composites a photo behind a fixed transparent frame.
//!
//! The user positions, scales and color-adjusts the photo with pointer,
//! touch, wheel and slider input, then exports the composite at a chosen
//! resolution. Rendering goes through `tiny-skia`; uploads decode through
//! the `image` crate, with SVG frames rasterized by `resvg`.
//!
//! - [`domain`] - value types and pure geometry (frame rect, auto-fit, resolutions)
//! - [`media`] - decoding, color adjustment, compositing and export
//! - [`ui`] - gesture state machine, redraw scheduling, notifications and
//!   the [`EditorSession`](ui::image_editor::EditorSession) that ties them together
//! - [`config`] and [`i18n`] - settings file and localized messages

#![doc(html_root_url = "https://docs.rs/frame_lens/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod media;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
