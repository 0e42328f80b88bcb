//! Selection algorithm and render-rect derivation

use crate::SelectionError;
use camera_device::PreviewSize;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Width the automatic mode steers toward
const AUTO_TARGET_WIDTH: u32 = 640;

/// Physical size of the display, read once at session construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    pub width: u32,
    pub height: u32,
}

impl DisplayMetrics {
    /// Create new display metrics
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// On-screen rectangle a preview resolution is fit into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRect {
    pub width: u32,
    pub height: u32,
}

/// Requested capture width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetWidth {
    /// Pick automatically: aspect-matching sizes above 640 preferred
    Auto,
    /// Steer toward an explicit width
    Width(u32),
}

impl TargetWidth {
    /// Interpret the external sentinel: `-1` (or any non-positive value)
    /// requests automatic selection
    pub fn from_raw(raw: i32) -> Self {
        if raw <= 0 {
            TargetWidth::Auto
        } else {
            TargetWidth::Width(raw as u32)
        }
    }
}

/// Chosen capture resolution plus the rectangle it renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub size: PreviewSize,
    pub rect: RenderRect,
}

/// Pick the supported resolution best matching the target width and the
/// display aspect, and derive its render rectangle.
///
/// Automatic mode first scans for sizes wider than 640 whose aspect ratio
/// matches the display in either orientation, keeping the one closest to
/// 640. If that yields nothing (or an explicit width was requested), the
/// size with the width nearest the target wins, aspect ignored. Ties go to
/// the earlier entry in the supported list.
pub fn select_preview_size(
    sizes: &[PreviewSize],
    target: TargetWidth,
    display: DisplayMetrics,
) -> Result<Selection, SelectionError> {
    if sizes.is_empty() {
        return Err(SelectionError::EmptySizeList);
    }

    let mut chosen = match target {
        TargetWidth::Auto => sizes
            .iter()
            .copied()
            .filter(|s| s.width > AUTO_TARGET_WIDTH && aspect_matches(*s, display))
            .min_by_key(|s| s.width - AUTO_TARGET_WIDTH),
        TargetWidth::Width(_) => None,
    };

    if chosen.is_none() {
        let effective = match target {
            TargetWidth::Auto => AUTO_TARGET_WIDTH,
            TargetWidth::Width(w) => w,
        };
        // non-empty list, so the nearest-width scan always yields a size
        chosen = sizes
            .iter()
            .copied()
            .min_by_key(|s| s.width.abs_diff(effective));
    }

    let size = chosen.ok_or(SelectionError::EmptySizeList)?;
    let rect = render_rect(size, display);
    debug!(%size, rect_width = rect.width, rect_height = rect.height, "preview size selected");
    Ok(Selection { size, rect })
}

/// True when the size's aspect ratio equals the display's, in either
/// orientation
fn aspect_matches(size: PreviewSize, display: DisplayMetrics) -> bool {
    let (w, h) = (size.width as u64, size.height as u64);
    let (dw, dh) = (display.width as u64, display.height as u64);
    w * dh == h * dw || w * dw == h * dh
}

/// Fit a capture resolution to the display: full height when the size is no
/// wider than the screen's aspect, full width otherwise. Integer math.
pub fn render_rect(size: PreviewSize, display: DisplayMetrics) -> RenderRect {
    let (w, h) = (size.width as u64, size.height as u64);
    let (dw, dh) = (display.width as u64, display.height as u64);
    if w * dh <= h * dw {
        RenderRect {
            width: (dh * w / h) as u32,
            height: display.height,
        }
    } else {
        RenderRect {
            width: display.width,
            height: (dw * w / h) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sizes(raw: &[(u32, u32)]) -> Vec<PreviewSize> {
        raw.iter().map(|&(w, h)| PreviewSize::new(w, h)).collect()
    }

    #[test]
    fn test_auto_prefers_aspect_match_over_nearest_width() {
        let list = sizes(&[(320, 240), (640, 480), (800, 480), (960, 540)]);
        let display = DisplayMetrics::new(1920, 1080);
        let selection = select_preview_size(&list, TargetWidth::Auto, display).unwrap();
        // (960, 540) matches 16:9 and is wider than 640; (640, 480) is
        // numerically closer to 640 but does not qualify
        assert_eq!(selection.size, PreviewSize::new(960, 540));
    }

    #[test]
    fn test_auto_falls_back_to_nearest_width() {
        // nothing matches 16:9 above 640
        let list = sizes(&[(320, 240), (640, 480), (800, 480)]);
        let display = DisplayMetrics::new(1920, 1080);
        let selection = select_preview_size(&list, TargetWidth::Auto, display).unwrap();
        assert_eq!(selection.size, PreviewSize::new(640, 480));
    }

    #[test]
    fn test_explicit_target_exact_match() {
        let list = sizes(&[(960, 540), (1280, 720), (1920, 1080)]);
        let display = DisplayMetrics::new(1920, 1080);
        let selection =
            select_preview_size(&list, TargetWidth::Width(1280), display).unwrap();
        assert_eq!(selection.size, PreviewSize::new(1280, 720));
    }

    #[test]
    fn test_tie_break_keeps_first_encountered() {
        // 560 and 720 are both 80 away from 640
        let list = sizes(&[(560, 420), (720, 540)]);
        let display = DisplayMetrics::new(1920, 1080);
        let selection =
            select_preview_size(&list, TargetWidth::Width(640), display).unwrap();
        assert_eq!(selection.size, PreviewSize::new(560, 420));

        let reversed = sizes(&[(720, 540), (560, 420)]);
        let selection =
            select_preview_size(&reversed, TargetWidth::Width(640), display).unwrap();
        assert_eq!(selection.size, PreviewSize::new(720, 540));
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let display = DisplayMetrics::new(1920, 1080);
        assert!(select_preview_size(&[], TargetWidth::Auto, display).is_err());
    }

    #[test]
    fn test_render_rect_fits_height() {
        // 640x480 on a 1920x1080 display: narrower than the screen aspect
        let rect = render_rect(PreviewSize::new(640, 480), DisplayMetrics::new(1920, 1080));
        assert_eq!(rect, RenderRect { width: 1440, height: 1080 });
    }

    #[test]
    fn test_render_rect_fits_width() {
        // 960x540 on a 1080x1920 portrait display: wider than the screen aspect
        let rect = render_rect(PreviewSize::new(960, 540), DisplayMetrics::new(1080, 1920));
        assert_eq!(rect, RenderRect { width: 1080, height: 1920 });
    }

    #[test]
    fn test_target_width_sentinel() {
        assert_eq!(TargetWidth::from_raw(-1), TargetWidth::Auto);
        assert_eq!(TargetWidth::from_raw(0), TargetWidth::Auto);
        assert_eq!(TargetWidth::from_raw(1280), TargetWidth::Width(1280));
    }

    proptest! {
        #[test]
        fn prop_selection_is_a_supported_size(
            raw in proptest::collection::vec((1u32..4000, 1u32..4000), 1..16),
            target in -1i32..4000,
        ) {
            let list = sizes(&raw);
            let display = DisplayMetrics::new(1920, 1080);
            let selection =
                select_preview_size(&list, TargetWidth::from_raw(target), display).unwrap();
            prop_assert!(list.contains(&selection.size));
        }

        #[test]
        fn prop_render_rect_pins_one_display_edge(
            w in 1u32..4000,
            h in 1u32..4000,
        ) {
            let display = DisplayMetrics::new(1920, 1080);
            let rect = render_rect(PreviewSize::new(w, h), display);
            // one dimension is always pinned to the display edge
            prop_assert!(rect.width == display.width || rect.height == display.height);
        }
    }
}
