//! The scene: an arena of objects, lights and materials.

use glint_math::{Color, Vec3};
use thiserror::Error;

use crate::material::Material;
use crate::surface::{Object, Shape};

/// Errors raised while assembling a scene. Rendering itself is infallible:
/// all degenerate numeric cases during tracing are handled as ordinary
/// control flow, so validation happens up front, here.
#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("material index {index} out of range ({count} materials defined)")]
    UnknownMaterial { index: usize, count: usize },

    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("box corners out of order: bottom_left must be <= top_right componentwise")]
    InvalidBoxCorners,

    #[error("specular exponent must be >= 0, got {0}")]
    InvalidSpecularExponent(f64),

    #[error("{name} must lie in [0, 1], got {value}")]
    FactorOutOfRange { name: &'static str, value: f64 },

    #[error("refraction index must be positive, got {0}")]
    InvalidRefractionIndex(f64),
}

/// A point light with an (unclamped) intensity color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
}

impl Light {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// What a ray sees when it escapes the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Solid(Color),
    /// Blend from `horizon` (direction in the horizontal plane) up to
    /// `zenith` (direction straight up), on the direction's y component.
    VerticalGradient { horizon: Color, zenith: Color },
}

impl Background {
    /// Background color seen along a ray. The origin is accepted for
    /// interface parity with environment lookups but both variants only
    /// depend on the direction.
    pub fn color(&self, _origin: Vec3, direction: Vec3) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::VerticalGradient { horizon, zenith } => {
                let t = 0.5 * (direction.normalize().y + 1.0);
                Color::new(
                    horizon.r * (1.0 - t) + zenith.r * t,
                    horizon.g * (1.0 - t) + zenith.g * t,
                    horizon.b * (1.0 - t) + zenith.b * t,
                )
            }
        }
    }
}

/// A complete scene. Built once, read-only while rendering: the tracer
/// only ever uses the query methods, so concurrent per-pixel evaluation
/// needs no synchronization.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<Object>,
    lights: Vec<Light>,
    materials: Vec<Material>,
    ambient: Color,
    background: Background,
}

impl Scene {
    pub fn new(ambient: Color, background: Background) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            materials: Vec::new(),
            ambient,
            background,
        }
    }

    /// Add a material to the scene's table, returning its index.
    pub fn add_material(&mut self, material: Material) -> Result<usize, SceneError> {
        if material.specular_exponent < 0.0 {
            return Err(SceneError::InvalidSpecularExponent(
                material.specular_exponent,
            ));
        }
        if !(0.0..=1.0).contains(&material.reflection_factor) {
            return Err(SceneError::FactorOutOfRange {
                name: "reflection factor",
                value: material.reflection_factor,
            });
        }
        if !(0.0..=1.0).contains(&material.opacity) {
            return Err(SceneError::FactorOutOfRange {
                name: "opacity",
                value: material.opacity,
            });
        }
        if material.refraction_index <= 0.0 {
            return Err(SceneError::InvalidRefractionIndex(
                material.refraction_index,
            ));
        }

        self.materials.push(material);
        Ok(self.materials.len() - 1)
    }

    /// Add an object referencing a previously added material.
    pub fn add_object(&mut self, shape: Shape, material: usize) -> Result<(), SceneError> {
        if material >= self.materials.len() {
            return Err(SceneError::UnknownMaterial {
                index: material,
                count: self.materials.len(),
            });
        }

        match &shape {
            Shape::Sphere { radius, .. } if *radius <= 0.0 => {
                return Err(SceneError::InvalidRadius(*radius));
            }
            Shape::Box {
                bottom_left,
                top_right,
            } if bottom_left.x > top_right.x
                || bottom_left.y > top_right.y
                || bottom_left.z > top_right.z =>
            {
                return Err(SceneError::InvalidBoxCorners);
            }
            _ => {}
        }

        self.objects.push(Object::new(shape, material));
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Objects in insertion order. The nearest-hit search depends on this
    /// ordering for its tie-breaking.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Look up a material by index. Indices held by objects are validated
    /// at insertion, so this never fails for them.
    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    pub fn ambient_light(&self) -> Color {
        self.ambient
    }

    pub fn background_color(&self, origin: Vec3, direction: Vec3) -> Color {
        self.background.color(origin, direction)
    }
}
