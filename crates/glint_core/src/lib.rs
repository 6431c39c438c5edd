//! Glint core - scene model for the ray tracer.
//!
//! This crate provides:
//!
//! - **Primitives**: `Shape` (sphere, triangle, axis-aligned box) and
//!   `Object`, with ray intersection, normal and texture-coordinate queries
//! - **Scene data**: `Material`, `Light`, `Background` and the `Scene`
//!   arena that owns them (objects reference materials by index)
//! - **Scene descriptions**: a JSON loader for scenes and camera settings
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let (scene, camera) = load_scene("scene.json")?;
//! println!("Loaded {} objects, {} lights",
//!     scene.objects().len(),
//!     scene.lights().len());
//! ```

pub mod loader;
pub mod material;
pub mod scene;
pub mod surface;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_str, CameraConfig, LoadError};
pub use material::{Material, Texture};
pub use scene::{Background, Light, Scene, SceneError};
pub use surface::{Object, Shape};
