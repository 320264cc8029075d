// SPDX-License-Identifier: MPL-2.0
//! Slider ranges and keyboard/track input.

use crate::config::{
    ADJUSTMENT_STEP, MAX_ADJUSTMENT_PERCENT, MAX_ZOOM, MIN_ADJUSTMENT_PERCENT, MIN_ZOOM, ZOOM_STEP,
};

/// The adjustable controls exposed as sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderControl {
    Zoom,
    Brightness,
    Contrast,
}

/// Keys a focused slider responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderKey {
    ArrowLeft,
    ArrowDown,
    ArrowRight,
    ArrowUp,
    Home,
    End,
}

/// Range and step of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderSpec {
    pub const ZOOM: Self = Self {
        min: MIN_ZOOM,
        max: MAX_ZOOM,
        step: ZOOM_STEP,
    };

    pub const BRIGHTNESS: Self = Self {
        min: MIN_ADJUSTMENT_PERCENT as f32,
        max: MAX_ADJUSTMENT_PERCENT as f32,
        step: ADJUSTMENT_STEP as f32,
    };

    pub const CONTRAST: Self = Self::BRIGHTNESS;

    #[must_use]
    pub fn for_control(control: SliderControl) -> Self {
        match control {
            SliderControl::Zoom => Self::ZOOM,
            SliderControl::Brightness => Self::BRIGHTNESS,
            SliderControl::Contrast => Self::CONTRAST,
        }
    }

    /// Rounds `value` to the nearest step from `min` and clamps it to the range.
    #[must_use]
    pub fn snap(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return if value > 0.0 { self.max } else { self.min };
        }
        let steps = ((value - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Trim float noise such as 1.2000001.
        let trimmed = (snapped * 10_000.0).round() / 10_000.0;
        trimmed.clamp(self.min, self.max)
    }

    /// Value after pressing `key` on a slider currently at `value`.
    #[must_use]
    pub fn apply_key(&self, value: f32, key: SliderKey) -> f32 {
        match key {
            SliderKey::ArrowLeft | SliderKey::ArrowDown => self.snap(value - self.step),
            SliderKey::ArrowRight | SliderKey::ArrowUp => self.snap(value + self.step),
            SliderKey::Home => self.min,
            SliderKey::End => self.max,
        }
    }

    /// Value at a 0..1 position along the track, snapped to the step.
    #[must_use]
    pub fn value_at_fraction(&self, fraction: f32) -> f32 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.snap(self.min + fraction * (self.max - self.min))
    }

    /// Position of `value` along the track, 0..1.
    #[must_use]
    pub fn fraction_of(&self, value: f32) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}
