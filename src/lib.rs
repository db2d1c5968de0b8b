pub mod calibration;
pub mod common;
pub mod device;
pub mod error;
pub mod frame;
pub mod overlay;
pub mod render;
pub mod session;
pub mod sink;
pub mod viewport;

#[cfg(feature = "backend-nokhwa")]
pub mod backend;
#[cfg(feature = "rerun")]
pub mod visualization;

// Re-export main types for convenience
pub use crate::calibration::{CalibrationProfile, OverlayOffset, frame_info};
pub use crate::common::{Color, PALETTE, PixelFormat, Point2f};
pub use crate::device::{
    CameraControl, CaptureBackend, CaptureConfig, CaptureDevice, ControlRange, DeviceInfo,
};
pub use crate::error::{CollimateError, Result};
pub use crate::frame::{Frame, NormalizedFrame, TestPattern};
pub use crate::overlay::{
    CircleList, CircleSpec, Crosshair, CrosshairSpec, OverlayScene, PlacedCircle, scene,
};
pub use crate::session::{CaptureSession, SessionStatus};
pub use crate::sink::{FrameReceiver, FrameSink};
pub use crate::viewport::Viewport;

#[cfg(feature = "backend-nokhwa")]
pub use crate::backend::{NokhwaBackend, enumerate_devices};
