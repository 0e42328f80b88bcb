//! Session configuration

use camera_device::{Facing, PixelFormat};
use serde::{Deserialize, Serialize};

/// Construction options for a camera session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Capture width the selector steers toward; `-1` selects automatically
    /// (aspect-matching sizes above 640 preferred)
    pub max_preview_width: i32,

    /// Facing requested for the first open
    pub facing: Facing,

    /// Pixel format the preview streams in
    pub pixel_format: PixelFormat,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_preview_width: -1,
            facing: Facing::Front,
            pixel_format: PixelFormat::Nv21,
        }
    }
}

impl SessionOptions {
    /// Automatic width selection starting on the given facing
    pub fn with_facing(facing: Facing) -> Self {
        Self {
            facing,
            ..Default::default()
        }
    }

    /// Explicit capture-width target
    pub fn with_max_width(width: u32) -> Self {
        Self {
            max_preview_width: width as i32,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto_front_nv21() {
        let options = SessionOptions::default();
        assert_eq!(options.max_preview_width, -1);
        assert_eq!(options.facing, Facing::Front);
        assert_eq!(options.pixel_format, PixelFormat::Nv21);
    }

    #[test]
    fn test_presets() {
        assert_eq!(SessionOptions::with_facing(Facing::Back).facing, Facing::Back);
        assert_eq!(SessionOptions::with_max_width(1280).max_preview_width, 1280);
    }
}
