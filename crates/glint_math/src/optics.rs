//! Reflection and Snell refraction.

use crate::Vec3;

/// Mirror an *outgoing* vector `v` about the normal `n`.
///
/// Both the light vector L (for the Phong highlight) and the view vector V
/// (for the mirror bounce) point away from the surface, so the reflected
/// vector is `2(v·n)n − v`. `n` must be unit length for the result to be a
/// true mirror image.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    2.0 * v.dot(n) * n - v
}

/// Refract `dir` through a surface with normal `normal`, going from a
/// medium with index `eta1` into one with index `eta2` (Snell's law).
///
/// `dir` points *into* the surface and `normal` against it; both are
/// normalized here so callers may pass raw vectors. Returns `Vec3::ZERO`
/// on total internal reflection; callers test the magnitude of the result
/// rather than matching on an error.
pub fn refract(dir: Vec3, normal: Vec3, eta1: f64, eta2: f64) -> Vec3 {
    let d = dir.normalize();
    let n = normal.normalize();
    let eta = eta1 / eta2;

    let cos_i = -d.dot(n);
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return Vec3::ZERO;
    }

    eta * d + (eta * cos_i - (1.0 - sin2_t).sqrt()) * n
}
