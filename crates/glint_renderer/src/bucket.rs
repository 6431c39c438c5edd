//! Tile-parallel rendering.
//!
//! The image is cut into rectangular buckets that render independently
//! on a rayon pool. Buckets are scheduled center-out, so the subject of
//! the image is usually finished first.

use rayon::prelude::*;

use glint_core::Scene;
use glint_math::Color;

use crate::camera::Camera;
use crate::renderer::{render_pixel, ImageBuffer};

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// A rectangular tile of the image, rendered as a unit.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// Left edge, in image pixels.
    pub x: u32,
    /// Top edge, in image pixels.
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bucket {
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Cut a `width` x `height` image into buckets of at most `bucket_size`
/// on a side (tiles at the right and bottom edges are clipped), ordered
/// nearest-to-center first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();

    for y in (0..height).step_by(bucket_size as usize) {
        for x in (0..width).step_by(bucket_size as usize) {
            buckets.push(Bucket {
                x,
                y,
                width: bucket_size.min(width - x),
                height: bucket_size.min(height - y),
            });
        }
    }

    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    buckets.sort_by(|a, b| {
        let da = center_distance_squared(a, center_x, center_y);
        let db = center_distance_squared(b, center_x, center_y);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    buckets
}

fn center_distance_squared(bucket: &Bucket, center_x: f64, center_y: f64) -> f64 {
    let dx = bucket.x as f64 + bucket.width as f64 / 2.0 - center_x;
    let dy = bucket.y as f64 + bucket.height as f64 / 2.0 - center_y;
    dx * dx + dy * dy
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

/// Render a single bucket.
///
/// Pixels come back in row-major order within the bucket.
pub fn render_bucket(scene: &Scene, camera: &Camera, bucket: Bucket) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(scene, camera, global_x, global_y));
        }
    }

    BucketResult { bucket, pixels }
}

/// Render the entire scene, distributing buckets over a rayon pool.
///
/// Pixel-for-pixel identical to the serial `render`: each pixel's ray is
/// independent, only the scheduling differs.
pub fn render_parallel(scene: &Scene, camera: &Camera) -> ImageBuffer {
    let start = std::time::Instant::now();
    let buckets = generate_buckets(camera.width(), camera.height(), DEFAULT_BUCKET_SIZE);
    let bucket_count = buckets.len();
    log::debug!("Rendering {} buckets", bucket_count);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(scene, camera, *bucket))
        .collect();

    let mut image = ImageBuffer::new(camera.width(), camera.height());
    for result in results {
        let bucket = result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[(local_y * bucket.width + local_x) as usize];
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    log::info!(
        "Rendered {}x{} in {:.2}s ({} buckets)",
        camera.width(),
        camera.height(),
        start.elapsed().as_secs_f64(),
        bucket_count
    );

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render;
    use glint_core::{Background, Light, Material, Shape};
    use glint_math::Vec3;

    #[test]
    fn test_buckets_tile_the_image() {
        // An image that divides evenly produces only full tiles.
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);
        assert!(buckets.iter().all(|b| b.width == 64 && b.height == 64));
    }

    #[test]
    fn test_edge_buckets_are_clipped() {
        let buckets = generate_buckets(100, 90, 64);
        assert_eq!(buckets.len(), 4);

        // Clipped tiles stay inside the image and every pixel is covered
        // exactly once.
        assert!(buckets
            .iter()
            .all(|b| b.x + b.width <= 100 && b.y + b.height <= 90));
        let covered: u32 = buckets.iter().map(Bucket::pixel_count).sum();
        assert_eq!(covered, 100 * 90);
    }

    #[test]
    fn test_schedule_is_center_out() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);

        // The middle tile of the 3x3 grid leads the schedule, and
        // distances from the image center never decrease after it.
        assert_eq!((buckets[0].x, buckets[0].y), (64, 64));
        let distances: Vec<f64> = buckets
            .iter()
            .map(|b| center_distance_squared(b, 96.0, 96.0))
            .collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut scene = Scene::new(
            Color::new(0.1, 0.1, 0.1),
            Background::VerticalGradient {
                horizon: Color::WHITE,
                zenith: Color::new(0.5, 0.7, 1.0),
            },
        );
        let id = scene
            .add_material(Material {
                diffuse: Color::new(0.8, 0.3, 0.3),
                specular: Color::WHITE,
                specular_exponent: 32.0,
                reflection_factor: 0.2,
                ..Default::default()
            })
            .unwrap();
        scene
            .add_object(
                Shape::Sphere {
                    center: Vec3::new(0.0, 0.0, -5.0),
                    radius: 1.5,
                },
                id,
            )
            .unwrap();
        scene.add_light(Light::new(Vec3::new(3.0, 4.0, 0.0), Color::WHITE));

        let camera = Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            60.0,
            1.0,
            100,
            80,
        );

        let serial = render(&scene, &camera);
        let parallel = render_parallel(&scene, &camera);
        assert_eq!(serial.pixels, parallel.pixels);
    }
}
