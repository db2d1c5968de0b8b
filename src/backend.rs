//! nokhwa-backed device enumeration and capture

use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, ControlValueSetter, FrameFormat, KnownCameraControl,
    RequestedFormat, RequestedFormatType, Resolution,
};

use crate::common::PixelFormat;
use crate::device::{CameraControl, CaptureBackend, CaptureConfig, CaptureDevice, DeviceInfo};
use crate::error::{CollimateError, Result};
use crate::frame::Frame;

/// Ordered list of attached video devices.
pub fn enumerate_devices() -> Result<Vec<DeviceInfo>> {
    let cameras =
        nokhwa::query(ApiBackend::Auto).map_err(|e| CollimateError::Other(e.to_string()))?;
    Ok(cameras
        .iter()
        .enumerate()
        .map(|(i, info)| DeviceInfo {
            index: i as u32,
            display_name: info.human_name().to_string(),
            path: info.description().to_string(),
        })
        .collect())
}

/// Opens OS cameras through nokhwa.
pub struct NokhwaBackend;

impl CaptureBackend for NokhwaBackend {
    fn open(&self, config: &CaptureConfig) -> Result<Box<dyn CaptureDevice>> {
        let requested = match (config.requested_width, config.requested_height) {
            (Some(width), Some(height)) => {
                RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
                    Resolution::new(width, height),
                    FrameFormat::MJPEG,
                    30,
                )))
            }
            _ => RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
        };

        let mut camera = Camera::new(CameraIndex::Index(config.device_index), requested)
            .map_err(|e| CollimateError::DeviceOpenFailed(e.to_string()))?;
        disable_auto_controls(&mut camera);
        camera
            .open_stream()
            .map_err(|e| CollimateError::DeviceOpenFailed(e.to_string()))?;

        Ok(Box::new(NokhwaDevice {
            camera,
            next_frame_id: 0,
        }))
    }
}

/// Ask the driver to leave focus and exposure in manual mode. Many backends
/// do not expose the auto toggles at all; those failures are logged and
/// otherwise ignored, the same way drivers silently ignore unsupported
/// requests.
fn disable_auto_controls(camera: &mut Camera) {
    for control in [KnownCameraControl::Focus, KnownCameraControl::Exposure] {
        if let Err(e) = camera.set_camera_control(control, ControlValueSetter::Boolean(false)) {
            tracing::debug!(?control, error = %e, "auto toggle not supported");
        }
    }
}

struct NokhwaDevice {
    camera: Camera,
    next_frame_id: u64,
}

impl CaptureDevice for NokhwaDevice {
    fn resolution(&self) -> (u32, u32) {
        let resolution = self.camera.resolution();
        (resolution.width(), resolution.height())
    }

    fn read_frame(&mut self) -> Result<Option<Frame>> {
        let buffer = match self.camera.frame() {
            Ok(buffer) => buffer,
            // A failed or short read is transient; the loop retries.
            Err(
                e @ (nokhwa::NokhwaError::ReadFrameError(_)
                | nokhwa::NokhwaError::ProcessFrameError { .. }),
            ) => {
                tracing::debug!(error = %e, "empty read");
                return Ok(None);
            }
            Err(e) => return Err(CollimateError::FrameReadFailed(e.to_string())),
        };

        let resolution = buffer.resolution();
        // Grayscale sources stay mono; everything else decodes to RGB and is
        // swapped to BGR during normalization.
        let frame = if buffer.source_frame_format() == FrameFormat::GRAY {
            Frame::new_with_data(
                resolution.width() as usize,
                resolution.height() as usize,
                PixelFormat::Mono8,
                buffer.buffer().to_vec(),
            )
        } else {
            let decoded = buffer
                .decode_image::<RgbFormat>()
                .map_err(|e| CollimateError::FrameReadFailed(e.to_string()))?;
            let (width, height) = decoded.dimensions();
            Frame::new_with_data(
                width as usize,
                height as usize,
                PixelFormat::Rgb24,
                decoded.into_raw(),
            )
        };

        let frame = frame.with_frame_id(self.next_frame_id);
        self.next_frame_id += 1;
        Ok(Some(frame))
    }

    fn set_control(&mut self, control: CameraControl, value: f64) -> Result<()> {
        let known = match control {
            CameraControl::Focus => KnownCameraControl::Focus,
            CameraControl::Exposure => KnownCameraControl::Exposure,
        };
        self.camera
            .set_camera_control(known, ControlValueSetter::Integer(value as i64))
            .map_err(|e| CollimateError::ControlFailed(e.to_string()))
    }
}

impl Drop for NokhwaDevice {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            tracing::debug!(error = %e, "stop_stream failed");
        }
    }
}
