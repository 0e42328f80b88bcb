//! Preview Size Selection
//!
//! Pure selection logic: given the capture resolutions a device supports, a
//! target width, and the display geometry, pick the resolution that best
//! fits and derive the on-screen rectangle it renders into. No device or
//! I/O dependency.

pub mod selector;

pub use selector::{
    select_preview_size, DisplayMetrics, RenderRect, Selection, TargetWidth,
};

use thiserror::Error;

/// Selection error types
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("Device reported no supported preview sizes")]
    EmptySizeList,
}
