//! Crosshair and circle geometry derived from the calibration state
//!
//! Everything here is computed on demand from the primitive calibration and
//! styling fields; nothing is cached across mutations.

use serde::{Deserialize, Serialize};

use crate::calibration::{CalibrationProfile, OverlayOffset};
use crate::common::{Color, Point2f};

/// Crosshair styling and dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairSpec {
    /// Stored rotation in degrees; only honored when `apply_angle` is set.
    pub angle_deg: f64,
    /// Full length of each arm, in current-frame pixels. Clamped to >= 0
    /// when endpoints are computed.
    pub length: f64,
    pub thickness: f64,
    pub color: Color,
    /// When false the crosshair stays axis-aligned regardless of `angle_deg`.
    pub apply_angle: bool,
}

impl Default for CrosshairSpec {
    fn default() -> Self {
        Self {
            angle_deg: 0.0,
            length: 900.0,
            thickness: 2.0,
            color: Color::RED,
            apply_angle: false,
        }
    }
}

/// A crosshair resolved to two concrete segments through the overlay center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crosshair {
    pub horizontal: (Point2f, Point2f),
    pub vertical: (Point2f, Point2f),
    pub thickness: f64,
    pub color: Color,
}

impl CrosshairSpec {
    /// Resolve the segment endpoints around `center`.
    pub fn endpoints(&self, center: Point2f) -> Crosshair {
        let half = self.length.max(0.0) / 2.0;
        let mut horizontal = (
            Point2f::new(center.x - half, center.y),
            Point2f::new(center.x + half, center.y),
        );
        let mut vertical = (
            Point2f::new(center.x, center.y - half),
            Point2f::new(center.x, center.y + half),
        );
        if self.apply_angle && self.angle_deg != 0.0 {
            let theta = self.angle_deg.to_radians();
            horizontal = (
                rotate_about(horizontal.0, center, theta),
                rotate_about(horizontal.1, center, theta),
            );
            vertical = (
                rotate_about(vertical.0, center, theta),
                rotate_about(vertical.1, center, theta),
            );
        }
        Crosshair {
            horizontal,
            vertical,
            thickness: self.thickness,
            color: self.color,
        }
    }
}

fn rotate_about(p: Point2f, center: Point2f, theta: f64) -> Point2f {
    let (sin, cos) = theta.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point2f::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// One concentric reference circle.
///
/// Radius and thickness are fixed pixel values: they do not rescale with the
/// frame resolution, only the shared center moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleSpec {
    pub radius: f64,
    pub thickness: f64,
    pub color: Color,
    pub visible: bool,
}

impl CircleSpec {
    pub fn new(radius: f64, color: Color, thickness: f64) -> Self {
        Self {
            radius,
            thickness,
            color,
            visible: true,
        }
    }
}

/// Ordered circle collection with an optional selected entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircleList {
    circles: Vec<CircleSpec>,
    selected: Option<usize>,
}

impl CircleList {
    /// The stock reticle: three lime circles at radii 250, 600 and 1100.
    pub fn stock() -> Self {
        let circles = vec![
            CircleSpec::new(250.0, Color::LIME, 2.0),
            CircleSpec::new(600.0, Color::LIME, 2.0),
            CircleSpec::new(1100.0, Color::LIME, 2.0),
        ];
        Self {
            circles,
            selected: Some(0),
        }
    }

    pub fn circles(&self) -> &[CircleSpec] {
        &self.circles
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Append a circle and select it.
    pub fn add(&mut self, circle: CircleSpec) {
        self.circles.push(circle);
        self.selected = Some(self.circles.len() - 1);
    }

    /// Remove the selected circle. Selection moves to the nearest remaining
    /// entry, or clears when the list empties.
    pub fn remove_selected(&mut self) {
        let Some(index) = self.selected else { return };
        if index >= self.circles.len() {
            return;
        }
        self.circles.remove(index);
        self.selected = if self.circles.is_empty() {
            None
        } else {
            Some(index.min(self.circles.len() - 1))
        };
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.circles.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&CircleSpec> {
        self.selected.and_then(|i| self.circles.get(i))
    }

    pub fn selected_mut(&mut self) -> Option<&mut CircleSpec> {
        self.selected.and_then(|i| self.circles.get_mut(i))
    }
}

/// A circle resolved onto the overlay center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCircle {
    pub center: Point2f,
    pub radius: f64,
    pub thickness: f64,
    pub color: Color,
}

/// Everything the rendering surface needs for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayScene {
    pub center: Point2f,
    pub crosshair: Crosshair,
    pub circles: Vec<PlacedCircle>,
}

/// Derive the full overlay for the current frame size. Invisible circles are
/// skipped.
pub fn scene(
    profile: &CalibrationProfile,
    offset: OverlayOffset,
    crosshair: &CrosshairSpec,
    circles: &[CircleSpec],
    frame_width: f64,
    frame_height: f64,
) -> OverlayScene {
    let center = profile.overlay_center(offset, frame_width, frame_height);
    let circles = circles
        .iter()
        .filter(|c| c.visible)
        .map(|c| PlacedCircle {
            center,
            radius: c.radius,
            thickness: c.thickness,
            color: c.color,
        })
        .collect();
    OverlayScene {
        center,
        crosshair: crosshair.endpoints(center),
        circles,
    }
}
