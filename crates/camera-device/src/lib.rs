//! Camera Device Model
//!
//! Device-side abstractions for a single-camera preview pipeline:
//! - `CameraDevice` / `DeviceProvider` capability traits at the hardware boundary
//! - facing enumeration and fallback resolution
//! - preview frame buffers and pixel formats
//! - an in-memory simulated backend for tests and hardware-free development

pub mod device;
pub mod facing;
pub mod frame;
pub mod sim;

pub use device::{CameraDevice, DeviceDescriptor, DeviceProvider};
pub use facing::FacingResolver;
pub use frame::{FrameBuffer, PixelFormat, PreviewSize};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Camera error types
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Failed to open camera: {0}")]
    Open(String),

    #[error("No camera device attached")]
    NoDevice,

    #[error("Parameter rejected by device: {0}")]
    Parameter(String),

    #[error("Streaming error: {0}")]
    Stream(String),
}

/// Physical direction a camera device points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Front,
    Back,
}

impl Facing {
    /// The other facing in the binary front/back model
    pub fn opposite(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facing::Front => write!(f, "front"),
            Facing::Back => write!(f, "back"),
        }
    }
}
