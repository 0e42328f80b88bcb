//! Preview frame buffers and pixel formats

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// Pixel format of the preview stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    /// Semi-planar 4:2:0, Y plane followed by interleaved VU
    #[default]
    Nv21,
    /// Packed 4:2:2
    Yuyv,
    /// 24-bit RGB, 3 bytes per pixel
    Rgb24,
}

impl PixelFormat {
    /// Bits per pixel, accounting for chroma subsampling
    pub fn bits_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::Nv21 => 12,
            PixelFormat::Yuyv => 16,
            PixelFormat::Rgb24 => 24,
        }
    }

    /// Byte length of one frame at the given capture resolution
    pub fn frame_bytes(&self, size: PreviewSize) -> usize {
        size.width as usize * size.height as usize * self.bits_per_pixel() as usize / 8
    }
}

/// A capture resolution reported and accepted by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

impl PreviewSize {
    /// Create a new preview size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for PreviewSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Fixed-size buffer a device fills with one captured frame.
///
/// The handle is shared: queueing it at the device and handing it to the
/// delivery path reference the same storage, so recycling a delivered frame
/// never copies or reallocates. The lock is uncontended on the single
/// control thread that drives capture and delivery.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    storage: Arc<Mutex<Vec<u8>>>,
}

impl FrameBuffer {
    /// Allocate a zeroed buffer of `len` bytes
    pub fn allocate(len: usize) -> Self {
        Self {
            storage: Arc::new(Mutex::new(vec![0u8; len])),
        }
    }

    /// Byte length of the buffer
    pub fn len(&self) -> usize {
        self.storage.lock().unwrap().len()
    }

    /// True for a zero-length buffer
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lock the frame contents for reading or writing
    pub fn data(&self) -> MutexGuard<'_, Vec<u8>> {
        self.storage.lock().unwrap()
    }

    /// Copy `bytes` into the start of the buffer, as a driver does when a
    /// capture completes. Bytes beyond the buffer length are ignored.
    pub fn fill(&self, bytes: &[u8]) {
        let mut data = self.storage.lock().unwrap();
        let n = bytes.len().min(data.len());
        data[..n].copy_from_slice(&bytes[..n]);
    }

    /// True when both handles reference the same storage
    pub fn shares_storage(&self, other: &FrameBuffer) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }
}
