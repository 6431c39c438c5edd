//! Math foundation for the glint ray tracer.
//!
//! All geometry uses `f64` (`glam::DVec3`). Rays are not a dedicated type:
//! the tracer passes `(origin, direction)` pairs throughout, and directions
//! are only guaranteed unit length where a function documents it.

// Re-export glam for convenience
pub use glam::{DVec2, DVec3 as Vec3};

mod color;
mod optics;

pub use color::Color;
pub use optics::{reflect, refract};

/// Numeric tolerance guarding near-zero denominators, near-tangent
/// discriminants and near-parallel rays.
pub const EPSILON: f64 = 1.0e-3;
