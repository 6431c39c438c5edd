use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use glint_core::{load_scene, Background, Light, Material, Scene, Shape, Texture};
use glint_math::{Color, DVec2, Vec3};
use glint_renderer::{render_parallel, Camera};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();

    let (scene, camera) = match args.get(1).map(String::as_str) {
        Some(path) => {
            log::info!("Loading scene from {}", path);
            let (scene, config) = load_scene(path)
                .with_context(|| format!("failed to load scene from {}", path))?;
            (scene, Camera::from_config(&config))
        }
        None => {
            log::info!("No scene file given, rendering the built-in demo scene");
            demo_scene()?
        }
    };

    let output = args.get(2).map(String::as_str).unwrap_or("render.png");

    let start = Instant::now();
    let image = render_parallel(&scene, &camera);
    image
        .save_png(output)
        .with_context(|| format!("failed to write {}", output))?;

    log::info!("Wrote {} in {:.2}s", output, start.elapsed().as_secs_f64());
    Ok(())
}

/// A small scene exercising every primitive and every shading path:
/// checkered floor, matte and mirror spheres, a glass sphere, a box and
/// a triangle, with two lights casting shadows.
fn demo_scene() -> Result<(Scene, Camera)> {
    let mut scene = Scene::new(
        Color::new(0.08, 0.08, 0.08),
        Background::VerticalGradient {
            horizon: Color::WHITE,
            zenith: Color::new(0.4, 0.6, 0.9),
        },
    );

    let floor = scene.add_material(Material {
        diffuse: Color::new(0.9, 0.9, 0.9),
        texture: Texture::Checker {
            color: Color::new(0.15, 0.15, 0.15),
            scale: 1.0,
        },
        ..Default::default()
    })?;

    let matte_red = scene.add_material(Material {
        diffuse: Color::new(0.85, 0.2, 0.2),
        specular: Color::new(0.6, 0.6, 0.6),
        specular_exponent: 48.0,
        ..Default::default()
    })?;

    let mirror = scene.add_material(Material {
        diffuse: Color::new(0.1, 0.1, 0.12),
        specular: Color::WHITE,
        specular_exponent: 200.0,
        reflection_factor: 0.7,
        ..Default::default()
    })?;

    let glass = scene.add_material(Material {
        diffuse: Color::new(0.05, 0.05, 0.05),
        specular: Color::WHITE,
        specular_exponent: 120.0,
        reflection_factor: 0.1,
        opacity: 0.2,
        refraction_index: 1.5,
        ..Default::default()
    })?;

    let brass = scene.add_material(Material {
        diffuse: Color::new(0.7, 0.55, 0.2),
        specular: Color::new(0.4, 0.4, 0.3),
        specular_exponent: 24.0,
        ..Default::default()
    })?;

    // Floor: two large triangles spanning a 20x20 quad at y = 0, wound
    // so their front faces look up at the camera.
    let quad = [
        Vec3::new(-10.0, 0.0, 2.0),
        Vec3::new(10.0, 0.0, 2.0),
        Vec3::new(10.0, 0.0, -18.0),
        Vec3::new(-10.0, 0.0, -18.0),
    ];
    let uv = |v: Vec3| DVec2::new(v.x, -v.z);
    scene.add_object(
        Shape::Triangle {
            v0: quad[0],
            v1: quad[1],
            v2: quad[2],
            tex0: uv(quad[0]),
            tex1: uv(quad[1]),
            tex2: uv(quad[2]),
        },
        floor,
    )?;
    scene.add_object(
        Shape::Triangle {
            v0: quad[0],
            v1: quad[2],
            v2: quad[3],
            tex0: uv(quad[0]),
            tex1: uv(quad[2]),
            tex2: uv(quad[3]),
        },
        floor,
    )?;

    scene.add_object(
        Shape::Sphere {
            center: Vec3::new(-2.2, 1.0, -7.0),
            radius: 1.0,
        },
        matte_red,
    )?;
    scene.add_object(
        Shape::Sphere {
            center: Vec3::new(0.0, 1.2, -9.5),
            radius: 1.2,
        },
        mirror,
    )?;
    scene.add_object(
        Shape::Sphere {
            center: Vec3::new(1.9, 0.9, -6.0),
            radius: 0.9,
        },
        glass,
    )?;
    scene.add_object(
        Shape::Box {
            bottom_left: Vec3::new(-4.5, 0.0, -11.0),
            top_right: Vec3::new(-3.0, 1.5, -9.5),
        },
        brass,
    )?;

    scene.add_light(Light::new(
        Vec3::new(-5.0, 8.0, -2.0),
        Color::new(0.9, 0.9, 0.85),
    ));
    scene.add_light(Light::new(
        Vec3::new(6.0, 5.0, -4.0),
        Color::new(0.35, 0.35, 0.4),
    ));

    let camera = Camera::new(
        Vec3::new(0.0, 2.0, 2.0),
        Vec3::new(0.0, 1.0, -8.0),
        Vec3::Y,
        55.0,
        1.0,
        960,
        540,
    );

    Ok((scene, camera))
}
