//! Optical surface properties.

use glint_math::{Color, DVec2};

/// How the diffuse color varies over a surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Texture {
    /// The base diffuse color everywhere.
    #[default]
    Solid,
    /// Checkerboard between the base diffuse color and `color`, on a UV
    /// grid with `scale` cells per unit.
    Checker { color: Color, scale: f64 },
}

/// Per-object optical properties, owned by the scene and referenced by
/// index from each object.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base diffuse color.
    pub diffuse: Color,
    /// Specular highlight color.
    pub specular: Color,
    /// Phong exponent, >= 0.
    pub specular_exponent: f64,
    /// Mirror contribution coefficient in [0, 1].
    pub reflection_factor: f64,
    /// 1 is fully opaque; anything below lets refracted light through.
    pub opacity: f64,
    /// Refractive index, > 0.
    pub refraction_index: f64,
    pub texture: Texture,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::new(0.5, 0.5, 0.5),
            specular: Color::BLACK,
            specular_exponent: 1.0,
            reflection_factor: 0.0,
            opacity: 1.0,
            refraction_index: 1.0,
            texture: Texture::Solid,
        }
    }
}

impl Material {
    /// Create an opaque diffuse material.
    pub fn diffuse(color: Color) -> Self {
        Self {
            diffuse: color,
            ..Default::default()
        }
    }

    /// The diffuse color at the given texture coordinate.
    pub fn diffuse_at(&self, uv: DVec2) -> Color {
        match &self.texture {
            Texture::Solid => self.diffuse,
            Texture::Checker { color, scale } => {
                let cell =
                    (uv.x * scale).floor() as i64 + (uv.y * scale).floor() as i64;
                if cell.rem_euclid(2) == 0 {
                    self.diffuse
                } else {
                    *color
                }
            }
        }
    }
}
