//! Raw capture frames and the normalized form handed to consumers

use std::time::Instant;

use crate::common::PixelFormat;

/// A raw frame as read from the device.
///
/// Owned exclusively by the capture loop; it is normalized into a fresh
/// [`NormalizedFrame`] before crossing the thread boundary.
pub struct Frame {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    /// Bytes per row, including any driver padding.
    pub stride_bytes: usize,
    pub format: PixelFormat,
    pub timestamp: Instant,
    pub frame_id: u64,
}

impl Frame {
    /// Create a dummy frame (grayscale 640x480)
    pub fn dummy() -> Self {
        Frame {
            data: vec![0u8; 640 * 480],
            width: 640,
            height: 480,
            stride_bytes: 640,
            format: PixelFormat::Mono8,
            timestamp: Instant::now(),
            frame_id: 0,
        }
    }

    /// Create a frame with specific data and dimensions. Stride is assumed
    /// packed (no row padding); use [`Frame::with_stride`] otherwise.
    pub fn new_with_data(width: usize, height: usize, format: PixelFormat, data: Vec<u8>) -> Self {
        let bpp = format.bytes_per_pixel().unwrap_or(1);
        Frame {
            data,
            width,
            height,
            stride_bytes: width * bpp,
            format,
            timestamp: Instant::now(),
            frame_id: 0,
        }
    }

    /// Override the row stride, for buffers with driver padding.
    pub fn with_stride(mut self, stride_bytes: usize) -> Self {
        self.stride_bytes = stride_bytes;
        self
    }

    /// Set frame ID for tracking
    pub fn with_frame_id(mut self, frame_id: u64) -> Self {
        self.frame_id = frame_id;
        self
    }

    /// Create a test pattern frame (useful for testing normalization and rendering)
    pub fn test_pattern(width: usize, height: usize, pattern_type: TestPattern) -> Self {
        let data = match pattern_type {
            TestPattern::Gradient => (0..height * width)
                .map(|i| {
                    let x = i % width;
                    let y = i / width;
                    ((x + y) % 256) as u8
                })
                .collect(),
            TestPattern::Checkerboard => (0..height * width)
                .map(|i| {
                    let x = i % width;
                    let y = i / width;
                    if (x / 32 + y / 32) % 2 == 0 { 255 } else { 0 }
                })
                .collect(),
            TestPattern::Noise => {
                use std::collections::hash_map::DefaultHasher;
                use std::hash::{Hash, Hasher};

                (0..height * width)
                    .map(|i| {
                        let mut hasher = DefaultHasher::new();
                        i.hash(&mut hasher);
                        (hasher.finish() % 256) as u8
                    })
                    .collect()
            }
        };

        Frame::new_with_data(width, height, PixelFormat::Mono8, data)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TestPattern {
    Gradient,
    Checkerboard,
    Noise,
}

/// A frame in the canonical consumer format: packed 3-channel BGR, 8 bits per
/// channel, `stride_bytes == 3 * width`.
///
/// Always a fresh allocation; it never aliases the capture loop's reusable
/// buffer, which is overwritten on the next read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFrame {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub stride_bytes: usize,
}

impl NormalizedFrame {
    /// Convert any supported raw frame into packed BGR24.
    ///
    /// Grayscale expands to three channels, four-channel input drops alpha,
    /// RGB swaps to BGR, and unknown layouts are reduced to 8-bit grayscale
    /// (first byte of each pixel) before expansion. Row padding is removed.
    pub fn from_frame(frame: &Frame) -> Self {
        let (width, height) = (frame.width, frame.height);
        let out_stride = width * 3;
        let mut data = vec![0u8; out_stride * height];

        for y in 0..height {
            let src = &frame.data[y * frame.stride_bytes..];
            let dst = &mut data[y * out_stride..y * out_stride + out_stride];
            match frame.format {
                PixelFormat::Bgr24 => {
                    dst.copy_from_slice(&src[..out_stride]);
                }
                PixelFormat::Bgra32 => {
                    for (out, px) in dst.chunks_exact_mut(3).zip(src.chunks_exact(4)) {
                        out.copy_from_slice(&px[..3]);
                    }
                }
                PixelFormat::Rgb24 => {
                    for (out, px) in dst.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
                        out[0] = px[2];
                        out[1] = px[1];
                        out[2] = px[0];
                    }
                }
                PixelFormat::Mono8 => {
                    for (out, v) in dst.chunks_exact_mut(3).zip(src.iter()) {
                        out.fill(*v);
                    }
                }
                PixelFormat::Other => {
                    // Unknown layout: estimate bytes per pixel from the stride
                    // and keep the leading byte of each pixel as grayscale.
                    let bpp = (frame.stride_bytes / width.max(1)).max(1);
                    for (out, px) in dst.chunks_exact_mut(3).zip(src.chunks_exact(bpp)) {
                        out.fill(px[0]);
                    }
                }
            }
        }

        NormalizedFrame {
            data,
            width,
            height,
            stride_bytes: out_stride,
        }
    }
}
