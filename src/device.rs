//! Device-facing configuration and the capture seam traits

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::Frame;

/// One attached video device as reported by enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Position in the enumeration order; this is what opens the device.
    pub index: u32,
    pub display_name: String,
    pub path: String,
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Capture request handed to a backend.
///
/// The requested resolution is best-effort; the driver may ignore it, and the
/// size it actually negotiated is read back after open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub device_index: u32,
    pub requested_width: Option<u32>,
    pub requested_height: Option<u32>,
}

impl CaptureConfig {
    pub fn new(device_index: u32) -> Self {
        Self {
            device_index,
            ..Default::default()
        }
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.requested_width = Some(width);
        self.requested_height = Some(height);
        self
    }
}

/// Manually adjustable device controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraControl {
    Focus,
    Exposure,
}

/// Supported value range for a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// An open capture handle.
///
/// Opened, read and written exclusively on the acquisition thread, so
/// implementations never cross a thread boundary after creation.
pub trait CaptureDevice {
    /// Frame size negotiated by the driver; (0, 0) when unreported.
    fn resolution(&self) -> (u32, u32);

    /// Next frame if one is ready. `Ok(None)` is a transient empty read and
    /// the loop retries; `Err` is a hard fault that ends acquisition.
    fn read_frame(&mut self) -> Result<Option<Frame>>;

    /// Write a control value. No bounds checking beyond what the device
    /// itself enforces.
    fn set_control(&mut self, control: CameraControl, value: f64) -> Result<()>;
}

/// Opens devices for a [`crate::session::CaptureSession`].
///
/// `open` runs on the acquisition thread and the returned device stays
/// there. Implementations disable auto focus and auto exposure on open (as
/// far as the driver allows) so manual control writes behave
/// deterministically.
pub trait CaptureBackend: Send + Sync {
    fn open(&self, config: &CaptureConfig) -> Result<Box<dyn CaptureDevice>>;
}
