//! Pinhole camera: ray generation through a near-plane screen.

use glint_core::CameraConfig;
use glint_math::Vec3;

/// A pinhole camera.
///
/// The screen is the near plane, spanned by two vectors anchored at its
/// bottom-left corner; `ray_through` maps screen coordinates (x right,
/// y up from the bottom) to a unit ray direction from the eye.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    width: u32,
    height: u32,

    // Derived near-plane frame.
    near_origin: Vec3,
    near_u: Vec3,
    near_v: Vec3,
}

impl Camera {
    /// Create a camera looking from `eye` toward `at`.
    ///
    /// `fovy` is the vertical field of view in degrees; `near` the distance
    /// from the eye to the projection plane; `width`/`height` the screen
    /// size in pixels.
    pub fn new(
        eye: Vec3,
        at: Vec3,
        up: Vec3,
        fovy: f64,
        near: f64,
        width: u32,
        height: u32,
    ) -> Self {
        let z_axis = (eye - at).normalize();
        let x_axis = up.cross(z_axis).normalize();
        let y_axis = z_axis.cross(x_axis);

        let sz = near;
        let sy = sz * (fovy.to_radians() / 2.0).tan();
        let sx = sy * width as f64 / height as f64;

        let near_origin = eye - sz * z_axis - sy * y_axis - sx * x_axis;
        let near_u = 2.0 * sx * x_axis;
        let near_v = 2.0 * sy * y_axis;

        Self {
            eye,
            width,
            height,
            near_origin,
            near_u,
            near_v,
        }
    }

    /// Build a camera from a loaded scene description.
    pub fn from_config(config: &CameraConfig) -> Self {
        let v = |a: [f64; 3]| Vec3::new(a[0], a[1], a[2]);
        Self::new(
            v(config.eye),
            v(config.at),
            v(config.up),
            config.fovy,
            config.near,
            config.width,
            config.height,
        )
    }

    /// Position of the observer; origin of every primary ray.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Unit direction from the eye through screen position `(x, y)`,
    /// with y measured up from the bottom of the screen.
    pub fn ray_through(&self, x: f64, y: f64) -> Vec3 {
        let point = self.near_origin
            + (x / self.width as f64) * self.near_u
            + (y / self.height as f64) * self.near_v;

        (point - self.eye).normalize()
    }
}
