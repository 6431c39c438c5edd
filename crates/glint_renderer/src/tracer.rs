//! Recursive ray tracing: nearest-hit search, Phong shading with shadows,
//! and recursion into mirror reflection and refraction.

use glint_core::{Object, Scene};
use glint_math::{reflect, refract, Color, Vec3};

/// Recursion ceiling for reflection and refraction rays.
pub const MAX_DEPTH: u32 = 6;

/// Shadow rays ignore intersections closer than this, so a surface does
/// not shadow itself.
const SHADOW_NEAR: f64 = 0.1;

/// A transmitted ray shorter than this is treated as extinguished
/// (total internal reflection degenerates the refracted direction).
const MIN_TRANSMISSION: f64 = 1.0e-4;

/// Trace a ray through the scene and return the color it collects.
///
/// A ray that hits nothing yields the background color. `depth` counts
/// the recursion level of this ray; primary rays start at 0.
pub fn trace_ray(scene: &Scene, origin: Vec3, direction: Vec3, depth: u32) -> Color {
    match nearest_hit(scene, origin, direction) {
        Some((object, distance)) => {
            let point = origin + distance * direction;
            shade(scene, origin, direction, point, object, depth)
        }
        None => scene.background_color(origin, direction),
    }
}

/// Walk every object and keep the closest intersection in front of the
/// origin. Candidates at zero or negative distance are behind the origin
/// and skipped; ties keep the earlier object.
fn nearest_hit<'a>(scene: &'a Scene, origin: Vec3, direction: Vec3) -> Option<(&'a Object, f64)> {
    let mut closest: Option<(&Object, f64)> = None;

    for object in scene.objects() {
        if let Some(distance) = object.shape().intercept(origin, direction) {
            if distance > 0.0 && closest.map_or(true, |(_, nearest)| distance < nearest) {
                closest = Some((object, distance));
            }
        }
    }

    closest
}

/// True when any object blocks the open segment between `point` and the
/// light, excluding a small guard band around the point itself.
fn is_in_shadow(scene: &Scene, point: Vec3, light_position: Vec3) -> bool {
    let to_light = light_position - point;
    let max_distance = to_light.length();
    let direction = to_light / max_distance;

    scene.objects().iter().any(|object| {
        object
            .shape()
            .intercept(point, direction)
            .is_some_and(|distance| distance > SHADOW_NEAR && distance < max_distance)
    })
}

/// Phong-shade a hit point, then recurse for the mirror and transmitted
/// contributions while `depth` is below [`MAX_DEPTH`].
///
/// `eye` is the ray's origin and `ray` its direction; both are needed
/// again here, the first for the view vector and the second to seed the
/// refracted ray.
fn shade(
    scene: &Scene,
    eye: Vec3,
    ray: Vec3,
    point: Vec3,
    object: &Object,
    depth: u32,
) -> Color {
    let material = scene.material(object.material());
    let diffuse = material.diffuse_at(object.shape().texture_coordinates_at(point));

    let mut color = diffuse * scene.ambient_light();

    // Stored normals are not unit length for every shape; normalize once,
    // here, at the point of use.
    let n = object.shape().normal_at(point).normalize();
    let v = (eye - point).normalize();

    for light in scene.lights() {
        let l = (light.position - point).normalize();
        if l.dot(n) <= 0.0 {
            // Light behind the surface.
            continue;
        }
        if is_in_shadow(scene, point, light.position) {
            continue;
        }

        color = color + (light.color * diffuse).scale(n.dot(l));

        let highlight = reflect(l, n).dot(v);
        if highlight > 0.0 {
            let specular = light.color * material.specular;
            color = color + specular.scale(highlight.powf(material.specular_exponent));
        }
    }

    if depth >= MAX_DEPTH {
        return color;
    }

    if material.reflection_factor > 0.0 {
        let bounce = reflect(v, n).normalize();
        let reflected = trace_ray(scene, point, bounce, depth + 1);
        color = color + reflected.scale(material.reflection_factor);
    }

    if material.opacity < 1.0 {
        // Refract in, cross the volume, refract out. The exit normal
        // points back inside so the second refraction sees the surface
        // from within.
        let inner = refract(ray, n, 1.0, material.refraction_index);
        let exit = object.shape().exit_point(point, inner);
        let exit_normal = -object.shape().normal_at(exit);
        let transmitted = refract(inner, exit_normal, material.refraction_index, 1.0);

        if transmitted.length() > MIN_TRANSMISSION {
            let behind = trace_ray(scene, exit, transmitted, depth + 1);
            color = color + behind.scale(1.0 - material.opacity);
        }
    }

    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{Background, Light, Material, Shape};

    fn sphere(center: Vec3, radius: f64) -> Shape {
        Shape::Sphere { center, radius }
    }

    /// One unit sphere straight ahead of the origin, with the given
    /// material, over the given background.
    fn single_sphere_scene(material: Material, background: Background) -> Scene {
        let mut scene = Scene::new(Color::BLACK, background);
        let id = scene.add_material(material).unwrap();
        scene
            .add_object(sphere(Vec3::new(0.0, 0.0, -5.0), 1.0), id)
            .unwrap();
        scene
    }

    #[test]
    fn test_empty_scene_returns_background_exactly() {
        let scene = Scene::new(
            Color::BLACK,
            Background::Solid(Color::new(0.3, 0.4, 0.5)),
        );

        // With zero objects every ray is the background identity.
        let color = trace_ray(&scene, Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0);
        assert_eq!(color, Color::new(0.3, 0.4, 0.5));
        let color = trace_ray(&scene, Vec3::new(1.0, -2.0, 3.0), Vec3::Y, 0);
        assert_eq!(color, Color::new(0.3, 0.4, 0.5));
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = single_sphere_scene(
            Material::default(),
            Background::Solid(Color::new(0.1, 0.2, 0.3)),
        );

        let color = trace_ray(&scene, Vec3::ZERO, Vec3::Y, 0);
        assert_eq!(color, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_light_behind_surface_contributes_nothing() {
        // The hit point is (0, 0, -4) with normal +z; a light at
        // (0, 5, -5) sits behind the tangent plane, so with black
        // ambient the pixel stays black.
        let mut scene =
            single_sphere_scene(Material::diffuse(Color::WHITE), Background::Solid(Color::BLACK));
        scene.add_light(Light::new(Vec3::new(0.0, 5.0, -5.0), Color::WHITE));

        let color = trace_ray(&scene, Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0);
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn test_head_on_diffuse_term() {
        // Light at the eye: L == N at the hit point, so the diffuse term
        // contributes the full material color.
        let mut scene = single_sphere_scene(
            Material::diffuse(Color::new(0.8, 0.6, 0.4)),
            Background::Solid(Color::BLACK),
        );
        scene.add_light(Light::new(Vec3::ZERO, Color::WHITE));

        let color = trace_ray(&scene, Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0);
        assert!((color.r - 0.8).abs() < 1e-9);
        assert!((color.g - 0.6).abs() < 1e-9);
        assert!((color.b - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_ambient_term_only() {
        let mut scene = Scene::new(
            Color::new(0.25, 0.25, 0.25),
            Background::Solid(Color::BLACK),
        );
        let id = scene.add_material(Material::diffuse(Color::WHITE)).unwrap();
        scene
            .add_object(sphere(Vec3::new(0.0, 0.0, -5.0), 1.0), id)
            .unwrap();

        let color = trace_ray(&scene, Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0);
        assert_eq!(color, Color::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn test_nearest_hit_picks_closer_object() {
        let mut scene = Scene::new(Color::WHITE, Background::Solid(Color::BLACK));
        let red = scene.add_material(Material::diffuse(Color::new(1.0, 0.0, 0.0))).unwrap();
        let blue = scene.add_material(Material::diffuse(Color::new(0.0, 0.0, 1.0))).unwrap();

        // Insert the farther sphere first so ordering cannot mask a bug.
        scene
            .add_object(sphere(Vec3::new(0.0, 0.0, -10.0), 1.0), blue)
            .unwrap();
        scene
            .add_object(sphere(Vec3::new(0.0, 0.0, -5.0), 1.0), red)
            .unwrap();

        let color = trace_ray(&scene, Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0);
        assert_eq!(color, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_shadow_blocks_light() {
        let light_position = Vec3::new(0.0, 3.0, -1.0);

        let mut lit =
            single_sphere_scene(Material::diffuse(Color::WHITE), Background::Solid(Color::BLACK));
        lit.add_light(Light::new(light_position, Color::WHITE));

        let mut shadowed = lit.clone();
        let blocker = shadowed.add_material(Material::default()).unwrap();
        shadowed
            .add_object(sphere(Vec3::new(0.0, 1.5, -2.5), 0.5), blocker)
            .unwrap();

        let eye = Vec3::ZERO;
        let ray = Vec3::new(0.0, 0.0, -1.0);

        // Unblocked: cos between N = +z and L = (0, 1, 1)/sqrt(2).
        let color = trace_ray(&lit, eye, ray, 0);
        assert!((color.r - 1.0 / 2.0_f64.sqrt()).abs() < 1e-9);

        // The blocker sits on the segment from the hit point to the light
        // but off the primary ray, so the same pixel goes dark.
        let color = trace_ray(&shadowed, eye, ray, 0);
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn test_is_in_shadow_interval() {
        let mut scene = Scene::new(Color::BLACK, Background::Solid(Color::BLACK));
        let id = scene.add_material(Material::default()).unwrap();
        scene
            .add_object(sphere(Vec3::new(0.0, 1.5, -2.5), 0.5), id)
            .unwrap();

        let point = Vec3::new(0.0, 0.0, -4.0);
        assert!(is_in_shadow(&scene, point, Vec3::new(0.0, 3.0, -1.0)));

        // A light in front of the blocker is unobstructed.
        assert!(!is_in_shadow(&scene, point, Vec3::new(0.0, 0.5, -3.5)));
    }

    #[test]
    fn test_reflection_picks_up_background() {
        let material = Material {
            diffuse: Color::BLACK,
            reflection_factor: 0.5,
            ..Default::default()
        };
        let scene =
            single_sphere_scene(material, Background::Solid(Color::new(0.0, 1.0, 0.0)));

        // Head-on hit: the bounce leaves straight back toward the eye and
        // escapes to the background, scaled by the reflection factor.
        let color = trace_ray(&scene, Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0);
        assert_eq!(color, Color::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_refraction_through_sphere() {
        let material = Material {
            diffuse: Color::BLACK,
            opacity: 0.5,
            refraction_index: 1.5,
            ..Default::default()
        };
        let scene =
            single_sphere_scene(material, Background::Solid(Color::new(0.0, 0.0, 1.0)));

        // Normal incidence never bends: the ray crosses the sphere along
        // the diameter and exits to the background, attenuated by opacity.
        let color = trace_ray(&scene, Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0);
        assert!((color.b - 0.5).abs() < 1e-9);
        assert_eq!(color.r, 0.0);
        assert_eq!(color.g, 0.0);
    }

    #[test]
    fn test_recursion_stops_at_max_depth() {
        let mirror = Material {
            diffuse: Color::BLACK,
            reflection_factor: 1.0,
            ..Default::default()
        };
        let scene = single_sphere_scene(mirror, Background::Solid(Color::new(0.0, 1.0, 0.0)));

        let eye = Vec3::ZERO;
        let ray = Vec3::new(0.0, 0.0, -1.0);

        // Below the ceiling the bounce escapes and contributes.
        assert_eq!(trace_ray(&scene, eye, ray, 0), Color::new(0.0, 1.0, 0.0));

        // At the ceiling both recursive branches are cut off.
        assert_eq!(trace_ray(&scene, eye, ray, MAX_DEPTH), Color::BLACK);
    }
}
