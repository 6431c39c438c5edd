//! RGB color algebra with clamped accumulation.
//!
//! Addition and scaling produce displayable values and clamp each component
//! to [0, 1]. Multiplication modulates two in-range colors and is left
//! unclamped (the product of values in [0, 1] stays in [0, 1]).

use std::ops::{Add, Mul};

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// An RGB color. Components are conceptually unbounded during accumulation
/// but every `+` and `scale` clamps the result to [0, 1] per component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Scale every component by `s`, clamping the result to [0, 1].
    pub fn scale(self, s: f64) -> Self {
        Self {
            r: clamp01(s * self.r),
            g: clamp01(s * self.g),
            b: clamp01(s * self.b),
        }
    }

    /// Convert to 8-bit RGB for raster output.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            (255.0 * clamp01(self.r)) as u8,
            (255.0 * clamp01(self.g)) as u8,
            (255.0 * clamp01(self.b)) as u8,
        ]
    }
}

impl Add for Color {
    type Output = Color;

    /// Component-wise addition, clamped to [0, 1].
    fn add(self, other: Color) -> Color {
        Color {
            r: clamp01(self.r + other.r),
            g: clamp01(self.g + other.g),
            b: clamp01(self.b + other.b),
        }
    }
}

impl Mul for Color {
    type Output = Color;

    /// Component-wise modulation. Unclamped: inputs are expected in range.
    fn mul(self, other: Color) -> Color {
        Color {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
        }
    }
}
