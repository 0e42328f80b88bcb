//! Lifecycle state machine for a single camera device

use camera_device::{
    CameraDevice, DeviceProvider, Facing, FacingResolver, FrameBuffer, PixelFormat, PreviewSize,
};
use frame_pool::FramePool;
use preview_selector::{select_preview_size, DisplayMetrics, TargetWidth};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::orientation::{rotation_degrees, OrientationPolicy};
use crate::{FrameListener, PreviewSurface, SessionError, SessionOptions};

/// Lifecycle states of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No device held
    Closed,
    /// Device opened, surface geometry not yet known
    Opening,
    /// Size and orientation applied, preview not running
    Configured,
    /// Frames streaming
    Previewing,
}

/// Owns and drives exactly one camera device behind a preview surface.
///
/// All transitions are synchronous and run on the thread that delivers
/// surface events and frame callbacks. Open and configure failures are
/// caught here and logged; callers observe them only as a session that
/// stayed (or returned to) `Closed`, never as a propagated error.
pub struct CameraSession {
    options: SessionOptions,
    display: DisplayMetrics,
    provider: Box<dyn DeviceProvider>,
    surface: Box<dyn PreviewSurface>,
    listener: Box<dyn FrameListener>,
    orientation: Box<dyn OrientationPolicy>,
    device: Option<Box<dyn CameraDevice>>,
    pool: FramePool,
    facing: Facing,
    preview_size: Option<PreviewSize>,
    state: SessionState,
    surface_ready: bool,
}

impl CameraSession {
    /// Create a closed session around the injected platform seams
    pub fn new(
        options: SessionOptions,
        display: DisplayMetrics,
        provider: Box<dyn DeviceProvider>,
        surface: Box<dyn PreviewSurface>,
        listener: Box<dyn FrameListener>,
        orientation: Box<dyn OrientationPolicy>,
    ) -> Self {
        let facing = options.facing;
        Self {
            options,
            display,
            provider,
            surface,
            listener,
            orientation,
            device: None,
            pool: FramePool::new(),
            facing,
            preview_size: None,
            state: SessionState::Closed,
            surface_ready: false,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Capture resolution of the configured device; absent while closed or
    /// unconfigured
    pub fn preview_size(&self) -> Option<PreviewSize> {
        self.preview_size
    }

    /// Facing of the current (or next-opened) device
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// The surface exists and can be rendered to: open a device
    pub fn on_surface_available(&mut self) {
        info!("surface available");
        if let Err(e) = self.open_device() {
            error!("camera open failed: {e}");
        }
    }

    /// The surface geometry is known: configure the device and start the
    /// preview. The surface's own format and size are host concerns and are
    /// only logged here.
    pub fn on_surface_configured(&mut self, format: PixelFormat, width: u32, height: u32) {
        debug!(?format, width, height, "surface configured");
        self.surface_ready = true;
        if self.device.is_none() {
            warn!("surface configured with no open device");
            return;
        }
        if let Err(e) = self.configure_and_start() {
            // device handle deliberately stays open for a later reconfigure
            warn!("preview configuration failed: {e}");
        }
    }

    /// The surface is gone: stop streaming and release the device
    pub fn on_surface_destroyed(&mut self) {
        info!("surface destroyed");
        self.surface_ready = false;
        self.stop_camera();
    }

    /// Stop the preview and release the device. Safe to call repeatedly.
    pub fn stop_camera(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.stop_preview();
            drop(device);
            info!(facing = %self.facing, "camera released");
        }
        self.pool.reset();
        self.preview_size = None;
        self.state = SessionState::Closed;
    }

    /// Toggle between front and back when both are attached; otherwise keep
    /// the current device untouched. Returns the facing in effect afterwards.
    pub fn switch_facing(&mut self) -> Facing {
        if !FacingResolver::new(self.provider.as_ref()).can_switch() {
            debug!(facing = %self.facing, "switch ignored: single facing attached");
            return self.facing;
        }
        self.facing = self.facing.opposite();
        info!(facing = %self.facing, "switching camera");
        self.stop_camera();
        if let Err(e) = self.open_device() {
            error!("camera open failed after switch: {e}");
            return self.facing;
        }
        if self.surface_ready {
            if let Err(e) = self.configure_and_start() {
                warn!("preview configuration failed after switch: {e}");
            }
        }
        self.facing
    }

    /// Begin streaming frames into the primed buffer. Requires an open,
    /// configured device; misuse is logged, not propagated.
    pub fn start_preview(&mut self) {
        if let Err(e) = self.try_start_preview() {
            warn!("preview start failed: {e}");
        }
    }

    /// Halt streaming without releasing the device
    pub fn stop_preview(&mut self) {
        if let Some(device) = self.device.as_mut() {
            device.stop_preview();
            if self.state == SessionState::Previewing {
                self.state = SessionState::Configured;
            }
            info!("preview stopped");
        }
    }

    /// Entry point for the capture driver: one filled buffer per frame.
    /// The buffer is requeued with the device before the listener runs.
    pub fn on_preview_frame(&mut self, frame: FrameBuffer) {
        let Some(device) = self.device.as_mut() else {
            debug!("frame delivered with no open device");
            return;
        };
        self.pool.recycle(&frame, device.as_mut());
        self.listener.on_preview_frame(&frame, self.facing);
    }

    fn open_device(&mut self) -> Result<(), SessionError> {
        self.facing = FacingResolver::new(self.provider.as_ref()).resolve(self.facing);
        let device = match self.provider.open(self.facing) {
            Ok(device) => device,
            Err(e) => {
                // some devices refuse facing-addressed opens; retry with the
                // platform default, which reports as back-facing
                warn!(facing = %self.facing, "open failed ({e}), retrying default device");
                match self.provider.open_default() {
                    Ok(device) => {
                        self.facing = Facing::Back;
                        device
                    }
                    Err(e) => {
                        error!("default device open failed: {e}");
                        self.state = SessionState::Closed;
                        return Err(SessionError::DeviceUnavailable);
                    }
                }
            }
        };
        self.device = Some(device);
        self.state = SessionState::Opening;
        info!(facing = %self.facing, "camera opened");
        Ok(())
    }

    fn configure_and_start(&mut self) -> Result<(), SessionError> {
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| SessionError::Configuration("no open device".to_string()))?;
        let sizes = device.supported_preview_sizes();
        let target = TargetWidth::from_raw(self.options.max_preview_width);
        let selection = select_preview_size(&sizes, target, self.display)?;
        device.set_preview_size(selection.size)?;
        self.surface.set_render_rect(selection.rect);
        let rotation = rotation_degrees(self.orientation.current_mode());
        device.set_display_orientation(rotation)?;
        device.cancel_autofocus();
        self.preview_size = Some(selection.size);
        self.state = SessionState::Configured;
        info!(size = %selection.size, rotation, "camera configured");
        self.try_start_preview()
    }

    fn try_start_preview(&mut self) -> Result<(), SessionError> {
        let size = self
            .preview_size
            .ok_or_else(|| SessionError::Configuration("preview size not applied".to_string()))?;
        let format = self.options.pixel_format;
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| SessionError::Configuration("no open device".to_string()))?;
        self.pool.prime(size, format, device.as_mut());
        device.start_preview()?;
        self.state = SessionState::Previewing;
        info!(size = %size, "preview started");
        Ok(())
    }
}
