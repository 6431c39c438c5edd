//! Glint renderer - recursive Whitted-style ray tracing.
//!
//! The engine walks every object per ray (no acceleration structure),
//! shades hits with Phong lighting plus shadows, and recurses for mirror
//! reflection and Snell refraction up to a fixed depth.

mod bucket;
mod camera;
mod renderer;
mod tracer;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::Camera;
pub use renderer::{render, render_pixel, ImageBuffer};
pub use tracer::{trace_ray, MAX_DEPTH};

/// Re-export the math types used throughout the public API.
pub use glint_math::{Color, Vec3};
