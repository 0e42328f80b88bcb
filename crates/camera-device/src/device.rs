//! Capability traits at the hardware boundary

use crate::frame::{FrameBuffer, PreviewSize};
use crate::{CameraError, Facing};
use serde::{Deserialize, Serialize};

/// Enumeration record for one attached camera
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Platform identifier (e.g. a device node or camera id string)
    pub id: String,
    /// Which way the sensor points
    pub facing: Facing,
}

impl DeviceDescriptor {
    /// Create a new descriptor
    pub fn new(id: impl Into<String>, facing: Facing) -> Self {
        Self {
            id: id.into(),
            facing,
        }
    }
}

/// An open camera device.
///
/// One instance corresponds to exactly one open hardware device; dropping
/// the handle releases it. All calls are blocking at this boundary and
/// return in bounded time or with an error.
pub trait CameraDevice {
    /// Capture resolutions the device can stream, queried fresh per configure
    fn supported_preview_sizes(&self) -> Vec<PreviewSize>;

    /// Apply a capture resolution; must be one of the supported sizes
    fn set_preview_size(&mut self, size: PreviewSize) -> Result<(), CameraError>;

    /// Rotate the capture stream before display (clockwise degrees)
    fn set_display_orientation(&mut self, degrees: u16) -> Result<(), CameraError>;

    /// Stop any in-progress focus search
    fn cancel_autofocus(&mut self);

    /// Begin streaming into queued buffers
    fn start_preview(&mut self) -> Result<(), CameraError>;

    /// Halt streaming without releasing the device
    fn stop_preview(&mut self);

    /// Hand the device a target buffer for the next capture
    fn queue_buffer(&mut self, buffer: FrameBuffer);
}

/// Device enumeration and opening capability (the platform seam)
pub trait DeviceProvider {
    /// All currently attached cameras
    fn enumerate(&self) -> Vec<DeviceDescriptor>;

    /// Open the first attached device with the given facing
    fn open(&self, facing: Facing) -> Result<Box<dyn CameraDevice>, CameraError>;

    /// Open the platform default device regardless of facing
    fn open_default(&self) -> Result<Box<dyn CameraDevice>, CameraError>;
}
