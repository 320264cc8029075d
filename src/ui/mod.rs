// SPDX-License-Identifier: MPL-2.0
//! Interaction and editor state.
//!
//! This module follows the Elm-style "state down, messages up" pattern: hosts
//! feed messages into the editor and react to the events it returns.
//!
//! - [`image_editor`] - the editing session and its commands
//! - [`state`] - gesture, slider and redraw state shared by the editor
//! - [`notifications`] - outcome notifications for the host to display

pub mod image_editor;
pub mod notifications;
pub mod state;
