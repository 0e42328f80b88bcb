//! Camera Session Lifecycle
//!
//! Orchestrates exactly one camera device behind a live preview surface:
//! opening with facing fallback, resolution selection, buffer priming,
//! preview start/stop, and device switching, driven by external
//! surface-lifecycle events. All transitions run synchronously on the
//! thread that delivers those events.

pub mod options;
pub mod orientation;
pub mod session;

pub use options::SessionOptions;
pub use orientation::{rotation_degrees, FixedOrientation, OrientationMode, OrientationPolicy};
pub use session::{CameraSession, SessionState};

use camera_device::{Facing, FrameBuffer};
use preview_selector::RenderRect;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Session error types. Internal: failures are caught at the lifecycle
/// boundary and surface to callers only as state outcomes and log records.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No camera device could be opened")]
    DeviceUnavailable,

    #[error("Preview configuration failed: {0}")]
    Configuration(String),

    #[error(transparent)]
    Camera(#[from] camera_device::CameraError),

    #[error(transparent)]
    Selection(#[from] preview_selector::SelectionError),
}

/// Render target for the preview stream
pub trait PreviewSurface {
    /// Apply the rectangle the preview letterboxes into
    fn set_render_rect(&mut self, rect: RenderRect);
}

/// Consumer of delivered preview frames
pub trait FrameListener {
    /// Called once per delivered frame, after the buffer has been requeued
    /// with the device
    fn on_preview_frame(&mut self, frame: &FrameBuffer, facing: Facing);
}

/// Initialize logging for binaries built on the session
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
