// SPDX-License-Identifier: MPL-2.0
//! Output resolution presets.
//!
//! Offers a ladder of standard sizes shaped to the frame's aspect ratio,
//! plus the frame's native size and the current canvas size. Presets
//! larger than the background photo are never offered.

use std::fmt;

use super::geometry::Dimensions;
use crate::domain::editing::CanvasSize;

/// Identifies where a [`Resolution`] comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionKind {
    Hd,
    TwoK,
    FullHd,
    FourK,
    FiveK,
    /// The frame image's native size, or the photo's without a frame.
    Original,
    /// The canvas size in use when the list was built.
    Current,
}

impl ResolutionKind {
    /// Standard ladder entries with their reference sizes.
    pub const LADDER: [(ResolutionKind, u32); 5] = [
        (ResolutionKind::Hd, 1080),
        (ResolutionKind::TwoK, 1440),
        (ResolutionKind::FullHd, 1920),
        (ResolutionKind::FourK, 2160),
        (ResolutionKind::FiveK, 2880),
    ];

    /// Stable key used by the CLI and in translations.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ResolutionKind::Hd => "hd",
            ResolutionKind::TwoK => "2k",
            ResolutionKind::FullHd => "fullhd",
            ResolutionKind::FourK => "4k",
            ResolutionKind::FiveK => "5k",
            ResolutionKind::Original => "original",
            ResolutionKind::Current => "current",
        }
    }

    /// Parses a key produced by [`ResolutionKind::key`]. Case-insensitive.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        [
            ResolutionKind::Hd,
            ResolutionKind::TwoK,
            ResolutionKind::FullHd,
            ResolutionKind::FourK,
            ResolutionKind::FiveK,
            ResolutionKind::Original,
            ResolutionKind::Current,
        ]
        .into_iter()
        .find(|kind| kind.key() == key)
    }

    fn label(self) -> &'static str {
        match self {
            ResolutionKind::Hd => "HD",
            ResolutionKind::TwoK => "2K",
            ResolutionKind::FullHd => "Full HD",
            ResolutionKind::FourK => "4K",
            ResolutionKind::FiveK => "5K",
            ResolutionKind::Original => "Original",
            ResolutionKind::Current => "Current",
        }
    }
}

/// A selectable output size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub kind: ResolutionKind,
    pub width: u32,
    pub height: u32,
    /// Display label, e.g. `"Full HD (1920×960)"`.
    pub label: String,
    /// True when this size exceeds the frame image's native pixels.
    pub frame_upscaled: bool,
}

impl Resolution {
    fn new(kind: ResolutionKind, width: u32, height: u32, frame: Option<Dimensions>) -> Self {
        let frame_upscaled =
            frame.is_some_and(|frame| width > frame.width || height > frame.height);
        Self {
            kind,
            width,
            height,
            label: format!("{} ({width}×{height})", kind.label()),
            frame_upscaled,
        }
    }

    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }

    fn same_size(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Shapes a ladder size to `aspect_ratio`: the long side equals `size`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shaped(size: u32, aspect_ratio: f32) -> (u32, u32) {
    if aspect_ratio >= 1.0 {
        (size, ((size as f32 / aspect_ratio).round() as u32).max(1))
    } else {
        (((size as f32 * aspect_ratio).round() as u32).max(1), size)
    }
}

/// Lists the output sizes valid for the current images.
///
/// Returns an empty list when there is no background photo. Every entry's
/// long side is at most the photo's long side. Entries are unique by size
/// and sorted by area, largest first.
#[must_use]
pub fn valid_resolutions(
    background: Option<Dimensions>,
    frame: Option<Dimensions>,
    canvas: CanvasSize,
) -> Vec<Resolution> {
    let Some(background) = background else {
        return Vec::new();
    };
    let ceiling = background.max_dimension();
    let aspect_ratio = frame.map_or(canvas.aspect_ratio(), Dimensions::aspect_ratio);

    let mut resolutions: Vec<Resolution> = ResolutionKind::LADDER
        .iter()
        .map(|&(kind, size)| {
            let (width, height) = shaped(size, aspect_ratio);
            Resolution::new(kind, width, height, frame)
        })
        .filter(|resolution| resolution.max_dimension() <= ceiling)
        .collect();

    // Without a frame, "Original" falls back to the photo's own size.
    let native = frame.unwrap_or(background);
    let extras = [
        (ResolutionKind::Original, native.width, native.height),
        (ResolutionKind::Current, canvas.width(), canvas.height()),
    ];
    for (kind, width, height) in extras {
        if width.max(height) > ceiling {
            continue;
        }
        if resolutions.iter().any(|r| r.same_size(width, height)) {
            continue;
        }
        resolutions.push(Resolution::new(kind, width, height, frame));
    }

    resolutions.sort_by(|a, b| b.area().cmp(&a.area()));
    resolutions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sizes(list: &[Resolution]) -> Vec<(u32, u32)> {
        list.iter().map(|r| (r.width, r.height)).collect()
    }

    #[test]
    fn no_background_means_no_resolutions() {
        let list = valid_resolutions(None, Some(Dimensions::new(1000, 500)), CanvasSize::default());
        assert!(list.is_empty());
    }

    #[test]
    fn ladder_is_shaped_to_frame_aspect_ratio() {
        let list = valid_resolutions(
            Some(Dimensions::new(6000, 4000)),
            Some(Dimensions::new(1000, 500)),
            CanvasSize::new(2000, 1000),
        );
        let found = sizes(&list);
        assert!(found.contains(&(2880, 1440)));
        assert!(found.contains(&(1920, 960)));
        assert!(found.contains(&(1080, 540)));
    }

    #[test]
    fn portrait_frame_shapes_height() {
        let list = valid_resolutions(
            Some(Dimensions::new(4000, 6000)),
            Some(Dimensions::new(800, 1000)),
            CanvasSize::new(1600, 2000),
        );
        assert!(sizes(&list).contains(&(1536, 1920)));
    }

    #[test]
    fn nothing_exceeds_background_ceiling() {
        let background = Dimensions::new(1500, 1000);
        let list = valid_resolutions(
            Some(background),
            Some(Dimensions::new(1000, 500)),
            CanvasSize::new(2000, 1000),
        );
        assert!(!list.is_empty());
        for resolution in &list {
            assert!(resolution.width.max(resolution.height) <= 1500, "{resolution}");
        }
        let kinds: Vec<_> = list.iter().map(|r| r.kind).collect();
        assert!(kinds.contains(&ResolutionKind::Hd));
        assert!(kinds.contains(&ResolutionKind::TwoK));
        assert!(kinds.contains(&ResolutionKind::Original));
        assert!(!kinds.contains(&ResolutionKind::Current));
    }

    #[test]
    fn entries_are_unique_and_sorted_by_area() {
        let list = valid_resolutions(
            Some(Dimensions::new(1920, 960)),
            Some(Dimensions::new(1920, 960)),
            CanvasSize::new(1920, 960),
        );
        let unique: HashSet<_> = sizes(&list).into_iter().collect();
        assert_eq!(unique.len(), list.len());
        for pair in list.windows(2) {
            assert!(pair[0].area() >= pair[1].area());
        }
        // Original and Current both equal Full HD here.
        assert!(list.iter().all(|r| r.kind != ResolutionKind::Original));
        assert!(list.iter().all(|r| r.kind != ResolutionKind::Current));
    }

    #[test]
    fn frame_upscaled_flag() {
        let list = valid_resolutions(
            Some(Dimensions::new(6000, 4000)),
            Some(Dimensions::new(1000, 500)),
            CanvasSize::new(2000, 1000),
        );
        for resolution in &list {
            let expected = resolution.width > 1000 || resolution.height > 500;
            assert_eq!(resolution.frame_upscaled, expected, "{resolution}");
        }
    }

    #[test]
    fn without_frame_uses_canvas_aspect_ratio() {
        let list = valid_resolutions(Some(Dimensions::new(3000, 3000)), None, CanvasSize::new(2000, 2000));
        assert!(sizes(&list).contains(&(2160, 2160)));
        assert!(list.iter().all(|r| !r.frame_upscaled));
    }

    #[test]
    fn labels_include_size() {
        let list = valid_resolutions(
            Some(Dimensions::new(6000, 4000)),
            Some(Dimensions::new(1000, 500)),
            CanvasSize::new(2000, 1000),
        );
        let full_hd = list
            .iter()
            .find(|r| r.kind == ResolutionKind::FullHd)
            .expect("full hd entry");
        assert_eq!(full_hd.label, "Full HD (1920×960)");
    }

    #[test]
    fn kind_keys_round_trip() {
        for (kind, _) in ResolutionKind::LADDER {
            assert_eq!(ResolutionKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(ResolutionKind::from_key("ORIGINAL"), Some(ResolutionKind::Original));
        assert_eq!(ResolutionKind::from_key("8k"), None);
    }
}
