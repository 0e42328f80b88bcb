//! Single-buffer pool implementation

use camera_device::{CameraDevice, FrameBuffer, PixelFormat, PreviewSize};
use tracing::debug;

/// Recycles one preview buffer between the device queue and the frame
/// consumer.
///
/// The steady-state footprint is a single allocation: `prime` allocates the
/// buffer once per preview start, and `recycle` hands the same storage back
/// to the device for every delivered frame.
#[derive(Debug, Default)]
pub struct FramePool {
    buffer: Option<FrameBuffer>,
    allocations: u64,
    frames_recycled: u64,
}

impl FramePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the steady-state buffer for the given resolution and format
    /// and queue it with the device. Called once per preview start.
    pub fn prime(
        &mut self,
        size: PreviewSize,
        format: PixelFormat,
        device: &mut dyn CameraDevice,
    ) {
        let buffer = FrameBuffer::allocate(format.frame_bytes(size));
        self.allocations += 1;
        debug!(%size, bytes = buffer.len(), "priming preview buffer");
        device.queue_buffer(buffer.clone());
        self.buffer = Some(buffer);
    }

    /// Requeue a delivered buffer as the target for the next capture.
    ///
    /// Must run before the frame is handed to the listener: the device
    /// regains a target buffer first, so a slow listener cannot starve
    /// capture.
    pub fn recycle(&mut self, frame: &FrameBuffer, device: &mut dyn CameraDevice) {
        self.frames_recycled += 1;
        device.queue_buffer(frame.clone());
    }

    /// Drop the steady-state buffer on preview stop
    pub fn reset(&mut self) {
        if self.buffer.take().is_some() {
            debug!("preview buffer released");
        }
    }

    /// True while a steady-state buffer is held
    pub fn is_primed(&self) -> bool {
        self.buffer.is_some()
    }

    /// Buffer allocations since construction
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Frames recycled back to the device queue
    pub fn frames_recycled(&self) -> u64 {
        self.frames_recycled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camera_device::sim::SimProvider;
    use camera_device::{DeviceProvider, Facing};

    #[test]
    fn test_prime_allocates_and_queues_once() {
        let provider = SimProvider::single(Facing::Front);
        let queue = provider.queue();
        let mut device = provider.open(Facing::Front).unwrap();

        let mut pool = FramePool::new();
        pool.prime(
            PreviewSize::new(640, 480),
            PixelFormat::Nv21,
            device.as_mut(),
        );

        assert!(pool.is_primed());
        assert_eq!(pool.allocations(), 1);
        let queued = queue.pop().unwrap();
        assert_eq!(queued.len(), 460_800);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_steady_state_is_one_allocation() {
        let provider = SimProvider::single(Facing::Front);
        let queue = provider.queue();
        let mut device = provider.open(Facing::Front).unwrap();

        let mut pool = FramePool::new();
        pool.prime(
            PreviewSize::new(320, 240),
            PixelFormat::Nv21,
            device.as_mut(),
        );

        let primed = queue.pop().unwrap();
        let mut frame = primed.clone();
        for _ in 0..100 {
            pool.recycle(&frame, device.as_mut());
            let requeued = queue.pop().unwrap();
            assert!(requeued.shares_storage(&primed));
            frame = requeued;
        }

        assert_eq!(pool.allocations(), 1);
        assert_eq!(pool.frames_recycled(), 100);
    }

    #[test]
    fn test_reset_drops_the_buffer() {
        let provider = SimProvider::single(Facing::Front);
        let mut device = provider.open(Facing::Front).unwrap();

        let mut pool = FramePool::new();
        pool.prime(
            PreviewSize::new(320, 240),
            PixelFormat::Nv21,
            device.as_mut(),
        );
        assert!(pool.is_primed());

        pool.reset();
        assert!(!pool.is_primed());
        // lifetime statistics survive a stop
        assert_eq!(pool.allocations(), 1);
    }
}
