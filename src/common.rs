use std::fmt;

use serde::{Deserialize, Serialize};

/// Pixel layout of a raw capture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Mono8,
    Bgr24,
    Bgra32,
    Rgb24,
    /// Anything the backend could not identify; normalized best-effort.
    Other,
}

impl PixelFormat {
    /// Bytes per pixel, or `None` when the layout is unknown.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            PixelFormat::Mono8 => Some(1),
            PixelFormat::Bgr24 | PixelFormat::Rgb24 => Some(3),
            PixelFormat::Bgra32 => Some(4),
            PixelFormat::Other => None,
        }
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        PixelFormat::Bgr24
    }
}

/// Immutable RGBA color value.
///
/// Overlay elements each hold their own copy, so recoloring one element can
/// never bleed into another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const LIME: Color = Color::rgb(0, 255, 0);
    pub const DEEP_SKY_BLUE: Color = Color::rgb(0, 191, 255);
    pub const GOLD: Color = Color::rgb(255, 215, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
}

/// Named colors offered for overlay elements.
pub const PALETTE: &[(&str, Color)] = &[
    ("Red", Color::RED),
    ("Green", Color::LIME),
    ("Blue", Color::DEEP_SKY_BLUE),
    ("Yellow", Color::GOLD),
    ("White", Color::WHITE),
    ("Cyan", Color::CYAN),
    ("Magenta", Color::MAGENTA),
];

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2f {
    pub x: f64,
    pub y: f64,
}

impl Point2f {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point2f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
