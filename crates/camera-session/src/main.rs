//! Preview stack demo - scripted run against the simulated backend
//!
//! Drives a full session lifecycle without hardware: surface available,
//! surface configured, a burst of frames, a facing switch, more frames,
//! surface destroyed. Every transition shows up in the logs.

use camera_device::sim::SimProvider;
use camera_device::{Facing, FrameBuffer, PixelFormat};
use camera_session::{
    init_logging, CameraSession, FixedOrientation, FrameListener, OrientationMode,
    PreviewSurface, SessionOptions,
};
use preview_selector::{DisplayMetrics, RenderRect};
use tracing::info;

struct LogSurface;

impl PreviewSurface for LogSurface {
    fn set_render_rect(&mut self, rect: RenderRect) {
        info!(width = rect.width, height = rect.height, "render rect applied");
    }
}

struct LogListener;

impl FrameListener for LogListener {
    fn on_preview_frame(&mut self, frame: &FrameBuffer, facing: Facing) {
        info!(bytes = frame.len(), %facing, "frame delivered");
    }
}

fn main() {
    init_logging();

    info!("=== Camera Preview Stack v{} ===", env!("CARGO_PKG_VERSION"));

    let provider = SimProvider::with_both_facings();
    let queue = provider.queue();

    let mut session = CameraSession::new(
        SessionOptions::default(),
        DisplayMetrics::new(1920, 1080),
        Box::new(provider),
        Box::new(LogSurface),
        Box::new(LogListener),
        Box::new(FixedOrientation(OrientationMode::Portrait)),
    );

    session.on_surface_available();
    session.on_surface_configured(PixelFormat::Nv21, 1920, 1080);

    // play the capture driver: pop the queued buffer, fill it, deliver it
    for n in 0..5u8 {
        if let Some(buffer) = queue.pop() {
            buffer.fill(&[n; 16]);
            session.on_preview_frame(buffer);
        }
    }

    let facing = session.switch_facing();
    info!(%facing, "switched camera");

    for n in 0..5u8 {
        if let Some(buffer) = queue.pop() {
            buffer.fill(&[n; 16]);
            session.on_preview_frame(buffer);
        }
    }

    session.on_surface_destroyed();
    info!(state = ?session.state(), "session finished");
}
