// SPDX-License-Identifier: MPL-2.0
//! Brightness and contrast adjustment for background photos.
//!
//! For a channel value `v`, brightness `b` and contrast `c` (both in percent,
//! 100 = neutral):
//!
//! ```text
//! v'  = clamp(v * b / 100)
//! k   = 259 * (d + 255) / (255 * (259 - d))      where d = c - 100
//! v'' = clamp(k * (v' - 128) + 128)
//! ```
//!
//! R, G and B are adjusted identically; alpha is untouched. The math runs on
//! straight color, so premultiplied pixels are demultiplied first.

use tiny_skia::{ColorU8, Pixmap};

use crate::domain::editing::AdjustmentPercent;

/// Contrast multiplier for a percentage, centered on 100.
fn contrast_factor(contrast: AdjustmentPercent) -> f32 {
    let offset = (contrast.value() - 100) as f32;
    (259.0 * (offset + 255.0)) / (255.0 * (259.0 - offset))
}

/// Builds the per-channel lookup table for a brightness/contrast pair.
#[must_use]
pub fn adjustment_lut(brightness: AdjustmentPercent, contrast: AdjustmentPercent) -> [u8; 256] {
    let gain = brightness.value() as f32 / 100.0;
    let factor = contrast_factor(contrast);

    let mut lut = [0u8; 256];
    for (value, slot) in lut.iter_mut().enumerate() {
        let brightened = (value as f32 * gain).clamp(0.0, 255.0);
        let contrasted = (factor * (brightened - 128.0) + 128.0).clamp(0.0, 255.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            *slot = contrasted.round() as u8;
        }
    }
    lut
}

/// Returns a copy of `source` with brightness and contrast applied.
///
/// A neutral pair returns an untouched clone.
#[must_use]
pub fn adjust_brightness_contrast(
    source: &Pixmap,
    brightness: AdjustmentPercent,
    contrast: AdjustmentPercent,
) -> Pixmap {
    let mut output = source.clone();
    if brightness.is_neutral() && contrast.is_neutral() {
        return output;
    }

    let lut = adjustment_lut(brightness, contrast);
    for pixel in output.pixels_mut() {
        let alpha = pixel.alpha();
        if alpha == 0 {
            continue;
        }
        let straight = pixel.demultiply();
        let adjusted = ColorU8::from_rgba(
            lut[usize::from(straight.red())],
            lut[usize::from(straight.green())],
            lut[usize::from(straight.blue())],
            alpha,
        );
        *pixel = adjusted.premultiply();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    fn solid(width: u32, height: u32, color: Color) -> Pixmap {
        let mut pixmap = Pixmap::new(width, height).expect("pixmap");
        pixmap.fill(color);
        pixmap
    }

    fn neutral() -> AdjustmentPercent {
        AdjustmentPercent::default()
    }

    #[test]
    fn neutral_lut_is_identity() {
        let lut = adjustment_lut(neutral(), neutral());
        for (value, mapped) in lut.iter().enumerate() {
            assert_eq!(usize::from(*mapped), value);
        }
    }

    #[test]
    fn brightness_scales_channels() {
        let lut = adjustment_lut(AdjustmentPercent::new(150), neutral());
        assert_eq!(lut[100], 150);
        assert_eq!(lut[200], 255);

        let lut = adjustment_lut(AdjustmentPercent::new(50), neutral());
        assert_eq!(lut[100], 50);
    }

    #[test]
    fn contrast_separates_from_midpoint() {
        let lut = adjustment_lut(neutral(), AdjustmentPercent::new(150));
        assert!(lut[200] > 200);
        assert!(lut[50] < 50);
        assert_eq!(lut[128], 128);

        let lut = adjustment_lut(neutral(), AdjustmentPercent::new(50));
        assert!(lut[200] < 200);
        assert!(lut[50] > 50);
    }

    #[test]
    fn lut_is_monotonic_for_all_extremes() {
        for b in [50, 100, 150] {
            for c in [50, 100, 150] {
                let lut = adjustment_lut(AdjustmentPercent::new(b), AdjustmentPercent::new(c));
                for pair in lut.windows(2) {
                    assert!(pair[0] <= pair[1], "lut not monotonic for b={b} c={c}");
                }
            }
        }
    }

    #[test]
    fn neutral_adjustment_returns_same_pixels() {
        let source = solid(3, 2, Color::from_rgba8(10, 20, 30, 255));
        let result = adjust_brightness_contrast(&source, neutral(), neutral());
        assert_eq!(result.data(), source.data());
    }

    #[test]
    fn brightness_lightens_opaque_pixels() {
        let source = solid(2, 2, Color::from_rgba8(100, 100, 100, 255));
        let result = adjust_brightness_contrast(&source, AdjustmentPercent::new(150), neutral());
        let pixel = result.pixel(0, 0).expect("pixel");
        assert_eq!(pixel.red(), 150);
        assert_eq!(pixel.alpha(), 255);
    }

    #[test]
    fn alpha_is_untouched() {
        let source = solid(1, 1, Color::from_rgba8(100, 100, 100, 64));
        let result =
            adjust_brightness_contrast(&source, AdjustmentPercent::new(150), AdjustmentPercent::new(150));
        assert_eq!(result.pixel(0, 0).expect("pixel").alpha(), 64);
    }

    #[test]
    fn transparent_pixels_stay_transparent() {
        let source = Pixmap::new(2, 2).expect("pixmap");
        let result = adjust_brightness_contrast(&source, AdjustmentPercent::new(150), neutral());
        assert!(result.data().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn adjustment_preserves_dimensions() {
        let source = solid(7, 3, Color::WHITE);
        let result = adjust_brightness_contrast(&source, AdjustmentPercent::new(60), neutral());
        assert_eq!((result.width(), result.height()), (7, 3));
    }
}
