//! Calibration base resolution and base-space center point

use serde::{Deserialize, Serialize};

use crate::common::Point2f;

/// The resolution a center point was measured at, together with that center.
///
/// The stored center stays geometrically correct when the device later
/// negotiates a different frame size: it is rescaled on demand by
/// [`CalibrationProfile::overlay_center`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    pub base_width: f64,
    pub base_height: f64,
    /// Center in base-space pixels.
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self {
            base_width: 3840.0,
            base_height: 2160.0,
            center_x: 1920.0,
            center_y: 1080.0,
        }
    }
}

impl CalibrationProfile {
    pub fn new(base_width: f64, base_height: f64, center_x: f64, center_y: f64) -> Self {
        Self {
            base_width,
            base_height,
            center_x,
            center_y,
        }
    }

    /// Scale factors from base space to the given frame size.
    ///
    /// A nonpositive dimension on either side yields 1, so base-space
    /// coordinates pass through unscaled instead of dividing by zero.
    pub fn scale(&self, frame_width: f64, frame_height: f64) -> (f64, f64) {
        let sx = if self.base_width > 0.0 && frame_width > 0.0 {
            frame_width / self.base_width
        } else {
            1.0
        };
        let sy = if self.base_height > 0.0 && frame_height > 0.0 {
            frame_height / self.base_height
        } else {
            1.0
        };
        (sx, sy)
    }

    /// Calibration center rescaled to the current frame, plus the manual
    /// offset. The offset is in current-frame pixels and is never scaled.
    pub fn overlay_center(
        &self,
        offset: OverlayOffset,
        frame_width: f64,
        frame_height: f64,
    ) -> Point2f {
        let (sx, sy) = self.scale(frame_width, frame_height);
        Point2f::new(
            self.center_x * sx + offset.x,
            self.center_y * sy + offset.y,
        )
    }

    /// Recalibrate to the current frame in one update: the frame becomes the
    /// base resolution and its midpoint the stored center, so overlay
    /// coordinates line up 1:1 with the live stream. No-op unless both
    /// dimensions are strictly positive.
    pub fn set_center_to_frame(&mut self, frame_width: f64, frame_height: f64) {
        if frame_width > 0.0 && frame_height > 0.0 {
            self.base_width = frame_width;
            self.base_height = frame_height;
            self.center_x = frame_width / 2.0;
            self.center_y = frame_height / 2.0;
        }
    }
}

/// Manual overlay shift in current-frame pixels, applied after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlayOffset {
    pub x: f64,
    pub y: f64,
}

impl OverlayOffset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One-line status summary of the current frame and overlay placement.
pub fn frame_info(
    profile: &CalibrationProfile,
    offset: OverlayOffset,
    frame_width: f64,
    frame_height: f64,
) -> String {
    let center = profile.overlay_center(offset, frame_width, frame_height);
    format!(
        "Frame: {:.0}\u{d7}{:.0} | Center: ({:.1}, {:.1}) | Offset: ({:+.1}, {:+.1})",
        frame_width, frame_height, center.x, center.y, offset.x, offset.y
    )
}
