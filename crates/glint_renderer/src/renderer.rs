//! Whole-image rendering.
//!
//! One deterministic ray per pixel: the tracer has no stochastic terms,
//! so repeated renders of the same scene are bit-identical.

use std::path::Path;

use glint_core::Scene;
use glint_math::Color;

use crate::camera::Camera;
use crate::tracer::trace_ray;

/// Render a single pixel.
///
/// Image rows run top to bottom while the camera's screen y axis points
/// up, so the row index is flipped before asking the camera for a ray.
pub fn render_pixel(scene: &Scene, camera: &Camera, x: u32, y: u32) -> Color {
    let screen_y = camera.height() - 1 - y;
    let direction = camera.ray_through(x as f64, screen_y as f64);
    trace_ray(scene, camera.eye(), direction, 0)
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to packed 8-bit RGB bytes, rows top to bottom.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_rgb8());
        }
        bytes
    }

    /// Save the image as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
    }
}

/// Render the entire scene to an image buffer, single-threaded.
pub fn render(scene: &Scene, camera: &Camera) -> ImageBuffer {
    let start = std::time::Instant::now();
    let mut image = ImageBuffer::new(camera.width(), camera.height());

    for y in 0..camera.height() {
        for x in 0..camera.width() {
            let color = render_pixel(scene, camera, x, y);
            image.set(x, y, color);
        }
    }

    log::info!(
        "Rendered {}x{} in {:.2}s",
        camera.width(),
        camera.height(),
        start.elapsed().as_secs_f64()
    );

    image
}
