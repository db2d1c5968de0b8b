//! Software compositor: normalized frame + overlay scene -> RGB image
//!
//! The interactive surface draws the overlay itself; this path exists for
//! headless use, demos and snapshot output.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};

use crate::common::Color;
use crate::frame::NormalizedFrame;
use crate::overlay::OverlayScene;

/// Convert a packed BGR frame into an [`RgbImage`].
pub fn to_rgb_image(frame: &NormalizedFrame) -> RgbImage {
    let mut img = RgbImage::new(frame.width as u32, frame.height as u32);
    for (y, row) in frame.data.chunks_exact(frame.stride_bytes).enumerate() {
        for (x, px) in row.chunks_exact(3).take(frame.width).enumerate() {
            img.put_pixel(x as u32, y as u32, Rgb([px[2], px[1], px[0]]));
        }
    }
    img
}

/// Stroke the overlay onto `img`. Thickness is approximated with repeated
/// one-pixel strokes.
pub fn draw_overlay(img: &mut RgbImage, scene: &OverlayScene) {
    let crosshair = &scene.crosshair;
    let strokes = stroke_count(crosshair.thickness);
    for i in 0..strokes {
        let off = (i - strokes / 2) as f32;
        draw_line_segment_mut(
            img,
            (crosshair.horizontal.0.x as f32, crosshair.horizontal.0.y as f32 + off),
            (crosshair.horizontal.1.x as f32, crosshair.horizontal.1.y as f32 + off),
            pixel(crosshair.color),
        );
        draw_line_segment_mut(
            img,
            (crosshair.vertical.0.x as f32 + off, crosshair.vertical.0.y as f32),
            (crosshair.vertical.1.x as f32 + off, crosshair.vertical.1.y as f32),
            pixel(crosshair.color),
        );
    }

    for circle in &scene.circles {
        let strokes = stroke_count(circle.thickness);
        let center = (
            circle.center.x.round() as i32,
            circle.center.y.round() as i32,
        );
        for i in 0..strokes {
            let radius = circle.radius.round() as i32 + (i - strokes / 2);
            if radius > 0 {
                draw_hollow_circle_mut(img, center, radius, pixel(circle.color));
            }
        }
    }
}

/// Render a frame with its overlay in one call.
pub fn compose(frame: &NormalizedFrame, scene: &OverlayScene) -> RgbImage {
    let mut img = to_rgb_image(frame);
    draw_overlay(&mut img, scene);
    img
}

fn stroke_count(thickness: f64) -> i32 {
    thickness.round().max(1.0) as i32
}

fn pixel(color: Color) -> Rgb<u8> {
    Rgb([color.r, color.g, color.b])
}
