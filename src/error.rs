//! Error handling for the capture and overlay core

use std::fmt;

/// Result type for collimate operations
pub type Result<T> = std::result::Result<T, CollimateError>;

/// Errors that can occur while capturing frames or driving a device
#[derive(Debug, Clone)]
pub enum CollimateError {
    /// Device could not be opened
    DeviceOpenFailed(String),
    /// A device control write was rejected
    ControlFailed(String),
    /// Reading a frame from the device failed hard
    FrameReadFailed(String),
    /// Invalid configuration error
    InvalidConfiguration(String),
    /// Generic error
    Other(String),
}

impl fmt::Display for CollimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollimateError::DeviceOpenFailed(msg) => write!(f, "Device open failed: {}", msg),
            CollimateError::ControlFailed(msg) => write!(f, "Control write failed: {}", msg),
            CollimateError::FrameReadFailed(msg) => write!(f, "Frame read failed: {}", msg),
            CollimateError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            CollimateError::Other(msg) => write!(f, "Capture error: {}", msg),
        }
    }
}

impl std::error::Error for CollimateError {}
