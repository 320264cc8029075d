// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[editor]` - Frame margin and default canvas size
//! - `[gestures]` - Inertia friction and wheel sensitivity
//! - `[export]` - Exported file naming
//!
//! Every field is optional; missing values fall back to [`defaults`] and
//! out-of-range values are clamped by the accessor methods on [`Config`].
//!
//! # Examples
//!
//! ```no_run
//! use frame_lens::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Framing and canvas settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Fraction of the canvas the frame occupies on its constrained axis.
    #[serde(default = "default_frame_margin", skip_serializing_if = "Option::is_none")]
    pub frame_margin: Option<f32>,

    /// Long side (px) of the canvas created when a frame loads.
    #[serde(
        default = "default_canvas_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_canvas_dimension: Option<u32>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            frame_margin: default_frame_margin(),
            default_canvas_dimension: default_canvas_dimension(),
        }
    }
}

/// Pointer gesture tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GesturesConfig {
    /// Velocity multiplier per inertia tick (0 < friction < 1).
    #[serde(
        default = "default_inertia_friction",
        skip_serializing_if = "Option::is_none"
    )]
    pub inertia_friction: Option<f32>,

    /// Wheel zoom sensitivity.
    #[serde(
        default = "default_wheel_sensitivity",
        skip_serializing_if = "Option::is_none"
    )]
    pub wheel_sensitivity: Option<f32>,
}

impl Default for GesturesConfig {
    fn default() -> Self {
        Self {
            inertia_friction: default_inertia_friction(),
            wheel_sensitivity: default_wheel_sensitivity(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    /// Prefix for suggested export file names.
    #[serde(
        default = "default_filename_prefix",
        skip_serializing_if = "Option::is_none"
    )]
    pub filename_prefix: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_prefix: default_filename_prefix(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Crate configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub gestures: GesturesConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Frame margin, clamped to a usable range.
    #[must_use]
    pub fn frame_margin(&self) -> f32 {
        let margin = self.editor.frame_margin.unwrap_or(DEFAULT_FRAME_MARGIN);
        if margin.is_finite() {
            margin.clamp(MIN_FRAME_MARGIN, MAX_FRAME_MARGIN)
        } else {
            DEFAULT_FRAME_MARGIN
        }
    }

    /// Default canvas long side, clamped to a usable range.
    #[must_use]
    pub fn default_canvas_dimension(&self) -> u32 {
        self.editor
            .default_canvas_dimension
            .unwrap_or(DEFAULT_CANVAS_DIMENSION)
            .clamp(MIN_CANVAS_DIMENSION, MAX_CANVAS_DIMENSION)
    }

    /// Inertia friction; values outside `(0, 1)` fall back to the default.
    #[must_use]
    pub fn inertia_friction(&self) -> f32 {
        match self.gestures.inertia_friction {
            Some(friction) if friction > 0.0 && friction < 1.0 => friction,
            _ => DEFAULT_INERTIA_FRICTION,
        }
    }

    /// Wheel sensitivity; non-positive or non-finite values fall back to the default.
    #[must_use]
    pub fn wheel_sensitivity(&self) -> f32 {
        match self.gestures.wheel_sensitivity {
            Some(sensitivity) if sensitivity.is_finite() && sensitivity > 0.0 => sensitivity,
            _ => DEFAULT_WHEEL_SENSITIVITY,
        }
    }

    /// Prefix for suggested export file names.
    #[must_use]
    pub fn filename_prefix(&self) -> &str {
        match self.export.filename_prefix.as_deref() {
            Some(prefix) if !prefix.trim().is_empty() => prefix,
            _ => DEFAULT_EXPORT_PREFIX,
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_frame_margin() -> Option<f32> {
    Some(DEFAULT_FRAME_MARGIN)
}

fn default_canvas_dimension() -> Option<u32> {
    Some(DEFAULT_CANVAS_DIMENSION)
}

fn default_inertia_friction() -> Option<f32> {
    Some(DEFAULT_INERTIA_FRICTION)
}

fn default_wheel_sensitivity() -> Option<f32> {
    Some(DEFAULT_WHEEL_SENSITIVITY)
}

fn default_filename_prefix() -> Option<String> {
    Some(DEFAULT_EXPORT_PREFIX.to_string())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
