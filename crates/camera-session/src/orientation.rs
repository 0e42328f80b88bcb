//! Display orientation mapping

use serde::{Deserialize, Serialize};

/// Host display orientation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrientationMode {
    Portrait,
    Landscape,
    ReversePortrait,
    ReverseLandscape,
}

/// Host-owned orientation lookup, resolved once per configure step
pub trait OrientationPolicy {
    /// The orientation the host display is currently in
    fn current_mode(&self) -> OrientationMode;
}

/// Policy for hosts whose display never rotates
pub struct FixedOrientation(pub OrientationMode);

impl OrientationPolicy for FixedOrientation {
    fn current_mode(&self) -> OrientationMode {
        self.0
    }
}

/// Clockwise rotation applied to the capture stream for a display mode
pub fn rotation_degrees(mode: OrientationMode) -> u16 {
    match mode {
        OrientationMode::Portrait => 90,
        OrientationMode::Landscape => 0,
        OrientationMode::ReversePortrait => 270,
        OrientationMode::ReverseLandscape => 0,
    }
}
