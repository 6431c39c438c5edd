//! JSON scene descriptions.
//!
//! A scene file carries the full render setup: camera, ambient light,
//! background, the material table, and the object and light lists. The
//! description structs deserialize with serde and are then assembled into
//! a validated [`Scene`].

use std::fs;
use std::path::Path;

use glint_math::{Color, DVec2, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::material::{Material, Texture};
use crate::scene::{Background, Light, Scene, SceneError};
use crate::surface::Shape;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),
}

/// Camera settings as described in a scene file. The renderer turns this
/// into its camera type; the core only transports the values.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CameraConfig {
    pub eye: [f64; 3],
    pub at: [f64; 3],
    #[serde(default = "default_up")]
    pub up: [f64; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fovy")]
    pub fovy: f64,
    /// Distance from the eye to the projection plane.
    #[serde(default = "default_near")]
    pub near: f64,
    pub width: u32,
    pub height: u32,
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fovy() -> f64 {
    60.0
}

fn default_near() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct SceneFile {
    camera: CameraConfig,
    #[serde(default)]
    ambient: [f64; 3],
    background: BackgroundDesc,
    materials: Vec<MaterialDesc>,
    #[serde(default)]
    lights: Vec<LightDesc>,
    #[serde(default)]
    objects: Vec<ObjectDesc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BackgroundDesc {
    Solid([f64; 3]),
    Gradient {
        horizon: [f64; 3],
        zenith: [f64; 3],
    },
}

#[derive(Debug, Deserialize)]
struct MaterialDesc {
    diffuse: [f64; 3],
    #[serde(default)]
    specular: [f64; 3],
    #[serde(default = "default_exponent")]
    specular_exponent: f64,
    #[serde(default)]
    reflection_factor: f64,
    #[serde(default = "default_opacity")]
    opacity: f64,
    #[serde(default = "default_refraction")]
    refraction_index: f64,
    #[serde(default)]
    checker: Option<CheckerDesc>,
}

#[derive(Debug, Deserialize)]
struct CheckerDesc {
    color: [f64; 3],
    scale: f64,
}

fn default_exponent() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    1.0
}

fn default_refraction() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct LightDesc {
    position: [f64; 3],
    color: [f64; 3],
}

#[derive(Debug, Deserialize)]
struct ObjectDesc {
    shape: ShapeDesc,
    material: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ShapeDesc {
    Sphere {
        center: [f64; 3],
        radius: f64,
    },
    Triangle {
        vertices: [[f64; 3]; 3],
        #[serde(default = "default_triangle_tex")]
        tex: [[f64; 2]; 3],
    },
    Box {
        bottom_left: [f64; 3],
        top_right: [f64; 3],
    },
}

fn default_triangle_tex() -> [[f64; 2]; 3] {
    [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
}

fn vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

fn color(c: [f64; 3]) -> Color {
    Color::new(c[0], c[1], c[2])
}

/// Load a scene description from a file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<(Scene, CameraConfig), LoadError> {
    let text = fs::read_to_string(path)?;
    load_scene_str(&text)
}

/// Load a scene description from a JSON string.
pub fn load_scene_str(text: &str) -> Result<(Scene, CameraConfig), LoadError> {
    let file: SceneFile = serde_json::from_str(text)?;

    let background = match file.background {
        BackgroundDesc::Solid(c) => Background::Solid(color(c)),
        BackgroundDesc::Gradient { horizon, zenith } => Background::VerticalGradient {
            horizon: color(horizon),
            zenith: color(zenith),
        },
    };

    let mut scene = Scene::new(color(file.ambient), background);

    let material_count = file.materials.len();
    for desc in file.materials {
        scene.add_material(Material {
            diffuse: color(desc.diffuse),
            specular: color(desc.specular),
            specular_exponent: desc.specular_exponent,
            reflection_factor: desc.reflection_factor,
            opacity: desc.opacity,
            refraction_index: desc.refraction_index,
            texture: match desc.checker {
                None => Texture::Solid,
                Some(checker) => Texture::Checker {
                    color: color(checker.color),
                    scale: checker.scale,
                },
            },
        })?;
    }

    for desc in file.objects {
        let shape = match desc.shape {
            ShapeDesc::Sphere { center, radius } => Shape::Sphere {
                center: vec3(center),
                radius,
            },
            ShapeDesc::Triangle { vertices, tex } => Shape::Triangle {
                v0: vec3(vertices[0]),
                v1: vec3(vertices[1]),
                v2: vec3(vertices[2]),
                tex0: DVec2::new(tex[0][0], tex[0][1]),
                tex1: DVec2::new(tex[1][0], tex[1][1]),
                tex2: DVec2::new(tex[2][0], tex[2][1]),
            },
            ShapeDesc::Box {
                bottom_left,
                top_right,
            } => Shape::Box {
                bottom_left: vec3(bottom_left),
                top_right: vec3(top_right),
            },
        };
        scene.add_object(shape, desc.material)?;
    }

    for desc in file.lights {
        scene.add_light(Light::new(vec3(desc.position), color(desc.color)));
    }

    log::info!(
        "Loaded scene: {} objects, {} lights, {} materials",
        scene.objects().len(),
        scene.lights().len(),
        material_count
    );

    Ok((scene, file.camera))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "camera": {
            "eye": [0, 0, 0],
            "at": [0, 0, -1],
            "width": 64,
            "height": 48
        },
        "ambient": [0.1, 0.1, 0.1],
        "background": { "solid": [0, 0, 0.2] },
        "materials": [
            { "diffuse": [1, 1, 1], "checker": { "color": [0, 0, 0], "scale": 2.0 } }
        ],
        "lights": [
            { "position": [0, 5, 0], "color": [1, 1, 1] }
        ],
        "objects": [
            { "shape": { "sphere": { "center": [0, 0, -5], "radius": 1 } }, "material": 0 },
            { "shape": { "triangle": { "vertices": [[0, 0, -3], [2, 0, -3], [0, 2, -3]] } }, "material": 0 },
            { "shape": { "box": { "bottom_left": [-1, -1, -5], "top_right": [1, 1, -3] } }, "material": 0 }
        ]
    }"#;

    #[test]
    fn test_load_minimal_scene() {
        let (scene, camera) = load_scene_str(MINIMAL).unwrap();

        assert_eq!(scene.objects().len(), 3);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.ambient_light(), Color::new(0.1, 0.1, 0.1));

        assert_eq!(camera.width, 64);
        assert_eq!(camera.height, 48);
        // Defaults fill the optional camera fields.
        assert_eq!(camera.up, [0.0, 1.0, 0.0]);
        assert_eq!(camera.fovy, 60.0);
        assert_eq!(camera.near, 1.0);
    }

    #[test]
    fn test_material_defaults() {
        let (scene, _) = load_scene_str(MINIMAL).unwrap();
        let material = scene.material(0);
        assert_eq!(material.opacity, 1.0);
        assert_eq!(material.reflection_factor, 0.0);
        assert!(matches!(material.texture, Texture::Checker { .. }));
    }

    #[test]
    fn test_bad_material_index_rejected() {
        let text = r#"{
            "camera": { "eye": [0,0,0], "at": [0,0,-1], "width": 8, "height": 8 },
            "background": { "solid": [0, 0, 0] },
            "materials": [],
            "objects": [
                { "shape": { "sphere": { "center": [0,0,-5], "radius": 1 } }, "material": 3 }
            ]
        }"#;

        let err = load_scene_str(text).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Scene(SceneError::UnknownMaterial { index: 3, count: 0 })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            load_scene_str("{ not json").unwrap_err(),
            LoadError::Json(_)
        ));
    }
}
