//! In-memory camera backend for tests and hardware-free development
//!
//! Implements the `DeviceProvider` / `CameraDevice` seams without touching
//! real hardware. Every backend interaction is appended to a shared
//! [`EventLog`] so callers can assert on open/configure/stream behavior,
//! and the device buffer queue is exposed through a [`BufferQueue`] handle
//! so a test or demo can play the role of the capture driver: pop the
//! queued buffer, fill it, and deliver it back to the session.

use crate::device::{CameraDevice, DeviceDescriptor, DeviceProvider};
use crate::frame::{FrameBuffer, PreviewSize};
use crate::{CameraError, Facing};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// One recorded backend interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    Opened(Facing),
    OpenedDefault,
    SetPreviewSize(PreviewSize),
    SetOrientation(u16),
    CancelAutofocus,
    StartPreview,
    StopPreview,
    BufferQueued,
    Released,
}

/// Shared, append-only record of backend interactions
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<SimEvent>>>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event
    pub fn push(&self, event: SimEvent) {
        self.events.lock().unwrap().push(event);
    }

    /// Snapshot of all recorded events, in order
    pub fn events(&self) -> Vec<SimEvent> {
        self.events.lock().unwrap().clone()
    }

    /// How many times `event` was recorded
    pub fn count(&self, event: &SimEvent) -> usize {
        self.events.lock().unwrap().iter().filter(|e| *e == event).count()
    }

    /// Total recorded events
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

/// Device-side buffer queue, shared with the driver role.
///
/// The session queues target buffers through `CameraDevice::queue_buffer`;
/// whoever plays the driver pops them, fills them, and delivers them back.
#[derive(Debug, Clone, Default)]
pub struct BufferQueue {
    inner: Arc<Mutex<VecDeque<FrameBuffer>>>,
}

impl BufferQueue {
    fn push(&self, buffer: FrameBuffer) {
        self.inner.lock().unwrap().push_back(buffer);
    }

    /// Take the next target buffer, oldest first
    pub fn pop(&self) -> Option<FrameBuffer> {
        self.inner.lock().unwrap().pop_front()
    }

    /// Buffers currently waiting for a capture
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// True when the device has no target buffer
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self) {
        self.inner.lock().unwrap().clear();
    }
}

/// Typical size ladder reported by the simulated devices
fn default_sizes() -> Vec<PreviewSize> {
    vec![
        PreviewSize::new(320, 240),
        PreviewSize::new(640, 480),
        PreviewSize::new(800, 480),
        PreviewSize::new(960, 540),
        PreviewSize::new(1280, 720),
    ]
}

/// Simulated provider: a configurable set of attached cameras with
/// scriptable open failures
pub struct SimProvider {
    descriptors: Vec<DeviceDescriptor>,
    sizes: Vec<PreviewSize>,
    fail_open: Vec<Facing>,
    fail_default: bool,
    queue: BufferQueue,
    log: EventLog,
}

impl SimProvider {
    fn new(descriptors: Vec<DeviceDescriptor>) -> Self {
        Self {
            descriptors,
            sizes: default_sizes(),
            fail_open: Vec::new(),
            fail_default: false,
            queue: BufferQueue::default(),
            log: EventLog::new(),
        }
    }

    /// Provider with one front and one back camera
    pub fn with_both_facings() -> Self {
        Self::new(vec![
            DeviceDescriptor::new("cam0", Facing::Front),
            DeviceDescriptor::new("cam1", Facing::Back),
        ])
    }

    /// Provider with a single camera of the given facing
    pub fn single(facing: Facing) -> Self {
        Self::new(vec![DeviceDescriptor::new("cam0", facing)])
    }

    /// Provider with no cameras attached
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Replace the size ladder every simulated device reports
    pub fn set_supported_sizes(&mut self, sizes: Vec<PreviewSize>) {
        self.sizes = sizes;
    }

    /// Script `open()` for the given facing to fail
    pub fn fail_open(&mut self, facing: Facing) {
        self.fail_open.push(facing);
    }

    /// Script `open_default()` to fail as well
    pub fn fail_default(&mut self) {
        self.fail_default = true;
    }

    /// Handle to the device buffer queue (the driver side)
    pub fn queue(&self) -> BufferQueue {
        self.queue.clone()
    }

    /// Handle to the shared event log
    pub fn log(&self) -> EventLog {
        self.log.clone()
    }
}

impl DeviceProvider for SimProvider {
    fn enumerate(&self) -> Vec<DeviceDescriptor> {
        self.descriptors.clone()
    }

    fn open(&self, facing: Facing) -> Result<Box<dyn CameraDevice>, CameraError> {
        if self.fail_open.contains(&facing) {
            return Err(CameraError::Open(format!(
                "simulated open failure ({facing})"
            )));
        }
        if !self.descriptors.iter().any(|d| d.facing == facing) {
            return Err(CameraError::NoDevice);
        }
        self.log.push(SimEvent::Opened(facing));
        debug!(%facing, "sim camera opened");
        Ok(Box::new(SimCamera::new(
            self.sizes.clone(),
            self.queue.clone(),
            self.log.clone(),
        )))
    }

    fn open_default(&self) -> Result<Box<dyn CameraDevice>, CameraError> {
        if self.fail_default {
            return Err(CameraError::Open(
                "simulated default-device failure".to_string(),
            ));
        }
        if self.descriptors.is_empty() {
            return Err(CameraError::NoDevice);
        }
        self.log.push(SimEvent::OpenedDefault);
        debug!("sim default camera opened");
        Ok(Box::new(SimCamera::new(
            self.sizes.clone(),
            self.queue.clone(),
            self.log.clone(),
        )))
    }
}

/// Simulated open device: accepts parameters and queues target buffers
struct SimCamera {
    sizes: Vec<PreviewSize>,
    queue: BufferQueue,
    preview_size: Option<PreviewSize>,
    previewing: bool,
    log: EventLog,
}

impl SimCamera {
    fn new(sizes: Vec<PreviewSize>, queue: BufferQueue, log: EventLog) -> Self {
        Self {
            sizes,
            queue,
            preview_size: None,
            previewing: false,
            log,
        }
    }
}

impl CameraDevice for SimCamera {
    fn supported_preview_sizes(&self) -> Vec<PreviewSize> {
        self.sizes.clone()
    }

    fn set_preview_size(&mut self, size: PreviewSize) -> Result<(), CameraError> {
        if !self.sizes.contains(&size) {
            return Err(CameraError::Parameter(format!("unsupported size {size}")));
        }
        self.preview_size = Some(size);
        self.log.push(SimEvent::SetPreviewSize(size));
        Ok(())
    }

    fn set_display_orientation(&mut self, degrees: u16) -> Result<(), CameraError> {
        if degrees % 90 != 0 || degrees >= 360 {
            return Err(CameraError::Parameter(format!(
                "unsupported rotation {degrees}"
            )));
        }
        self.log.push(SimEvent::SetOrientation(degrees));
        Ok(())
    }

    fn cancel_autofocus(&mut self) {
        self.log.push(SimEvent::CancelAutofocus);
    }

    fn start_preview(&mut self) -> Result<(), CameraError> {
        if self.preview_size.is_none() {
            return Err(CameraError::Stream("no preview size applied".to_string()));
        }
        self.previewing = true;
        self.log.push(SimEvent::StartPreview);
        Ok(())
    }

    fn stop_preview(&mut self) {
        if self.previewing {
            self.previewing = false;
            self.log.push(SimEvent::StopPreview);
        }
    }

    fn queue_buffer(&mut self, buffer: FrameBuffer) {
        self.queue.push(buffer);
        self.log.push(SimEvent::BufferQueued);
    }
}

impl Drop for SimCamera {
    fn drop(&mut self) {
        // releasing a device forgets any target buffers it was handed
        self.queue.clear();
        self.log.push(SimEvent::Released);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_facing_fails() {
        let provider = SimProvider::single(Facing::Back);
        assert!(provider.open(Facing::Front).is_err());
        assert!(provider.open(Facing::Back).is_ok());
    }

    #[test]
    fn test_scripted_open_failure() {
        let mut provider = SimProvider::with_both_facings();
        provider.fail_open(Facing::Front);
        assert!(provider.open(Facing::Front).is_err());
        assert!(provider.open(Facing::Back).is_ok());
        assert!(provider.open_default().is_ok());
    }

    #[test]
    fn test_open_default_on_empty_provider_fails() {
        let provider = SimProvider::empty();
        assert!(matches!(
            provider.open_default(),
            Err(CameraError::NoDevice)
        ));
    }

    #[test]
    fn test_buffer_queue_roundtrip() {
        let provider = SimProvider::single(Facing::Front);
        let queue = provider.queue();
        let mut device = provider.open(Facing::Front).unwrap();

        let buffer = FrameBuffer::allocate(64);
        device.queue_buffer(buffer.clone());
        assert_eq!(queue.len(), 1);

        let queued = queue.pop().unwrap();
        assert!(queued.shares_storage(&buffer));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_start_preview_requires_size() {
        let provider = SimProvider::single(Facing::Front);
        let mut device = provider.open(Facing::Front).unwrap();
        assert!(device.start_preview().is_err());

        device.set_preview_size(PreviewSize::new(640, 480)).unwrap();
        assert!(device.start_preview().is_ok());
    }

    #[test]
    fn test_release_logged_on_drop() {
        let provider = SimProvider::single(Facing::Front);
        let log = provider.log();
        let device = provider.open(Facing::Front).unwrap();
        drop(device);
        assert_eq!(log.count(&SimEvent::Released), 1);
    }

    #[test]
    fn test_unsupported_size_rejected() {
        let provider = SimProvider::single(Facing::Front);
        let mut device = provider.open(Facing::Front).unwrap();
        assert!(device.set_preview_size(PreviewSize::new(123, 45)).is_err());
    }
}
