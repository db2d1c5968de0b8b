use rerun::{RecordingStream, RecordingStreamBuilder};

use crate::frame::NormalizedFrame;
use crate::overlay::OverlayScene;

/// Visualization of capture frames and overlay geometry using Rerun
///
/// This module provides reusable functions to inspect the live stream and the
/// derived overlay in the Rerun viewer while tuning a calibration.

pub struct RerunVisualizer {
    rec: RecordingStream,
    _storage: Option<rerun::MemorySinkStorage>,
}

impl RerunVisualizer {
    /// Create a new Rerun visualizer with memory sink for real-time viewing
    pub fn new(app_name: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let (rec, storage) = RecordingStreamBuilder::new(app_name).memory()?;

        Ok(RerunVisualizer {
            rec,
            _storage: Some(storage),
        })
    }

    /// Create a new Rerun visualizer that saves to file
    pub fn new_with_file(app_name: &str, file_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let rec = RecordingStreamBuilder::new(app_name).save(file_path)?;

        Ok(RerunVisualizer {
            rec,
            _storage: None,
        })
    }

    /// Log a normalized BGR frame to Rerun
    pub fn log_frame(
        &self,
        entity_path: &str,
        frame: &NormalizedFrame,
    ) -> Result<(), rerun::RecordingStreamError> {
        self.rec.log(
            entity_path,
            &rerun::Image::from_elements(
                &frame.data,
                [frame.width as u32, frame.height as u32],
                rerun::ColorModel::BGR,
            ),
        )
    }

    /// Log the overlay (crosshair + circles) as 2D line strips
    pub fn log_overlay(
        &self,
        entity_path: &str,
        scene: &OverlayScene,
    ) -> Result<(), rerun::RecordingStreamError> {
        let mut strips: Vec<Vec<[f32; 2]>> = Vec::with_capacity(2 + scene.circles.len());
        let crosshair = &scene.crosshair;
        strips.push(vec![
            [crosshair.horizontal.0.x as f32, crosshair.horizontal.0.y as f32],
            [crosshair.horizontal.1.x as f32, crosshair.horizontal.1.y as f32],
        ]);
        strips.push(vec![
            [crosshair.vertical.0.x as f32, crosshair.vertical.0.y as f32],
            [crosshair.vertical.1.x as f32, crosshair.vertical.1.y as f32],
        ]);

        for circle in &scene.circles {
            strips.push(circle_strip(
                circle.center.x,
                circle.center.y,
                circle.radius,
            ));
        }

        self.rec.log(entity_path, &rerun::LineStrips2D::new(strips))
    }

    /// Log text information to Rerun
    pub fn log_text(&self, entity_path: &str, text: &str) -> Result<(), rerun::RecordingStreamError> {
        self.rec.log(entity_path, &rerun::TextDocument::new(text))
    }

    /// Log a scalar value (for plotting drop counts, fps, etc.)
    pub fn log_scalar(&self, entity_path: &str, value: f64) -> Result<(), rerun::RecordingStreamError> {
        self.rec.log(entity_path, &rerun::Scalar::new(value))
    }

    /// Get the underlying RecordingStream for advanced usage
    pub fn recording_stream(&self) -> &RecordingStream {
        &self.rec
    }
}

const CIRCLE_SEGMENTS: usize = 64;

fn circle_strip(cx: f64, cy: f64, radius: f64) -> Vec<[f32; 2]> {
    (0..=CIRCLE_SEGMENTS)
        .map(|i| {
            let theta = (i as f64 / CIRCLE_SEGMENTS as f64) * std::f64::consts::TAU;
            [
                (cx + radius * theta.cos()) as f32,
                (cy + radius * theta.sin()) as f32,
            ]
        })
        .collect()
}
