//! Scene primitives: spheres, triangles and axis-aligned boxes.
//!
//! Every query takes a ray as an `(origin, direction)` pair. Directions are
//! not assumed unit length; intersection distances are measured in multiples
//! of the direction vector.

use glint_math::{DVec2, Vec3, EPSILON};

/// Minimum plane distance accepted by the triangle intersection.
const MIN_TRIANGLE_DISTANCE: f64 = 1.0e-4;

/// A geometric primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere {
        center: Vec3,
        radius: f64,
    },
    Triangle {
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        /// Per-vertex texture coordinates, interpolated barycentrically.
        tex0: DVec2,
        tex1: DVec2,
        tex2: DVec2,
    },
    /// Axis-aligned box. `bottom_left <= top_right` componentwise.
    Box {
        bottom_left: Vec3,
        top_right: Vec3,
    },
}

impl Shape {
    /// Find the distance along the ray at which it intersects this shape.
    ///
    /// Returns `None` when the geometry admits no intersection at all. The
    /// returned candidate distance may still be zero or negative (an
    /// intersection behind the origin); callers filter for the range they
    /// accept, exactly as the nearest-hit and shadow searches do.
    pub fn intercept(&self, origin: Vec3, direction: Vec3) -> Option<f64> {
        match self {
            Shape::Sphere { center, radius } => {
                let to_origin = origin - *center;

                let a = direction.dot(direction);
                let b = 2.0 * direction.dot(to_origin);
                let c = to_origin.dot(to_origin) - radius * radius;

                let delta = b * b - 4.0 * a * c;

                if delta.abs() <= EPSILON {
                    // Tangent ray: a single root.
                    Some(-b / (2.0 * a))
                } else if delta > EPSILON {
                    let root = delta.sqrt();
                    Some(((-b + root) / (2.0 * a)).min((-b - root) / (2.0 * a)))
                } else {
                    None
                }
            }

            Shape::Triangle { v0, v1, v2, .. } => {
                let v0_to_v1 = *v1 - *v0;
                let v1_to_v2 = *v2 - *v1;
                let normal = v0_to_v1.cross(v1_to_v2);

                // One-sided policy: the ray must approach the front face.
                let divisor = direction.dot(normal);
                if divisor > -EPSILON {
                    return None;
                }

                let distance = (*v0 - origin).dot(normal) / divisor;
                if distance < MIN_TRIANGLE_DISTANCE {
                    return None;
                }

                // Signed-area test against all three edges.
                let p = origin + distance * direction;
                let n0 = v0_to_v1.cross(p - *v0);
                let n1 = v1_to_v2.cross(p - *v1);
                let n2 = (*v0 - *v2).cross(p - *v2);

                let unit_normal = normal.normalize();
                let a0 = 0.5 * unit_normal.dot(n0);
                let a1 = 0.5 * unit_normal.dot(n1);
                let a2 = 0.5 * unit_normal.dot(n2);

                if a0 > 0.0 && a1 > 0.0 && a2 > 0.0 {
                    Some(distance)
                } else {
                    None
                }
            }

            Shape::Box {
                bottom_left,
                top_right,
            } => {
                // Simplified slab test: axes are tried in fixed x -> y -> z
                // order and the first face whose hit point lies within the
                // box extents wins. Kept as-is for compatibility with the
                // reference renderer, which uses the same policy.
                for axis in 0..3 {
                    let d = direction[axis];
                    if d.abs() <= EPSILON {
                        continue;
                    }

                    let plane = if d > 0.0 {
                        bottom_left[axis]
                    } else {
                        top_right[axis]
                    };
                    let distance = (plane - origin[axis]) / d;
                    if distance <= EPSILON {
                        continue;
                    }

                    let p = origin + distance * direction;
                    let u = (axis + 1) % 3;
                    let v = (axis + 2) % 3;
                    if p[u] >= bottom_left[u]
                        && p[u] <= top_right[u]
                        && p[v] >= bottom_left[v]
                        && p[v] <= top_right[v]
                    {
                        return Some(distance);
                    }
                }

                None
            }
        }
    }

    /// Follow a ray from a point on (or inside) the shape to the point where
    /// it leaves the shape's volume.
    ///
    /// Only spheres have an interior: the quadratic is re-solved from
    /// `point` and the larger root picked. Triangles and boxes return the
    /// input point unchanged, as does a sphere when the ray admits no exit.
    pub fn exit_point(&self, point: Vec3, direction: Vec3) -> Vec3 {
        match self {
            Shape::Sphere { center, radius } => {
                let to_origin = point - *center;

                let a = direction.dot(direction);
                let b = 2.0 * direction.dot(to_origin);
                let c = to_origin.dot(to_origin) - radius * radius;

                let delta = b * b - 4.0 * a * c;

                let distance = if delta.abs() <= EPSILON {
                    -b / (2.0 * a)
                } else if delta > EPSILON {
                    let root = delta.sqrt();
                    ((-b + root) / (2.0 * a)).max((-b - root) / (2.0 * a))
                } else {
                    return point;
                };

                point + distance * direction
            }

            Shape::Triangle { .. } | Shape::Box { .. } => point,
        }
    }

    /// Surface normal at a point on the shape.
    ///
    /// Sphere normals are unit length by construction. Triangle normals are
    /// the raw edge cross product and are NOT unit length; the shading code
    /// normalizes at the point of use. Box normals are unit axis vectors
    /// selected by the face `point` lies on (within `EPSILON`); a point on
    /// no face yields the zero vector.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Shape::Sphere { center, radius } => (point - *center) / *radius,

            Shape::Triangle { v0, v1, v2, .. } => (*v1 - *v0).cross(*v2 - *v0),

            Shape::Box {
                bottom_left,
                top_right,
            } => {
                if (point.x - bottom_left.x).abs() < EPSILON {
                    Vec3::new(-1.0, 0.0, 0.0)
                } else if (point.x - top_right.x).abs() < EPSILON {
                    Vec3::new(1.0, 0.0, 0.0)
                } else if (point.y - bottom_left.y).abs() < EPSILON {
                    Vec3::new(0.0, -1.0, 0.0)
                } else if (point.y - top_right.y).abs() < EPSILON {
                    Vec3::new(0.0, 1.0, 0.0)
                } else if (point.z - bottom_left.z).abs() < EPSILON {
                    Vec3::new(0.0, 0.0, -1.0)
                } else if (point.z - top_right.z).abs() < EPSILON {
                    Vec3::new(0.0, 0.0, 1.0)
                } else {
                    Vec3::ZERO
                }
            }
        }
    }

    /// Texture coordinates at a point on the shape.
    pub fn texture_coordinates_at(&self, point: Vec3) -> DVec2 {
        match self {
            Shape::Sphere { .. } => {
                let normal = self.normal_at(point);
                let phi = normal.y.atan2(normal.x);
                let theta = (normal.x * normal.x + normal.y * normal.y)
                    .sqrt()
                    .atan2(normal.z);

                DVec2::new(
                    3.0 * (1.0 + phi / std::f64::consts::PI),
                    3.0 * (1.0 - theta / std::f64::consts::PI),
                )
            }

            Shape::Triangle {
                v0,
                v1,
                v2,
                tex0,
                tex1,
                tex2,
            } => {
                let v0_to_v1 = *v1 - *v0;
                let v1_to_v2 = *v2 - *v1;
                let v2_to_v0 = *v0 - *v2;
                let normal = v0_to_v1.cross(v1_to_v2).normalize();

                // Signed sub-triangle areas opposite each vertex.
                let n0 = v1_to_v2.cross(point - *v1);
                let n1 = v2_to_v0.cross(point - *v2);
                let n2 = v0_to_v1.cross(point - *v0);

                let a0 = 0.5 * normal.dot(n0);
                let a1 = 0.5 * normal.dot(n1);
                let a2 = 0.5 * normal.dot(n2);
                let total = a0 + a1 + a2;

                (a0 / total) * *tex0 + (a1 / total) * *tex1 + (a2 / total) * *tex2
            }

            Shape::Box {
                bottom_left,
                top_right,
            } => {
                let size = *top_right - *bottom_left;
                let offset = point - *bottom_left;

                if (point.x - bottom_left.x).abs() < EPSILON
                    || (point.x - top_right.x).abs() < EPSILON
                {
                    DVec2::new(offset.y / size.y, offset.z / size.z)
                } else if (point.y - bottom_left.y).abs() < EPSILON
                    || (point.y - top_right.y).abs() < EPSILON
                {
                    DVec2::new(offset.z / size.z, offset.x / size.x)
                } else if (point.z - bottom_left.z).abs() < EPSILON
                    || (point.z - top_right.z).abs() < EPSILON
                {
                    DVec2::new(offset.x / size.x, offset.y / size.y)
                } else {
                    DVec2::ZERO
                }
            }
        }
    }
}

/// A scene object: a shape plus an index into the scene's material table.
///
/// Objects hold indices rather than material references so the scene can
/// own a flat material arena (several objects routinely share a material).
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    shape: Shape,
    material: usize,
}

impl Object {
    pub fn new(shape: Shape, material: usize) -> Self {
        Self { shape, material }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Index of this object's material in the scene's material table.
    pub fn material(&self) -> usize {
        self.material
    }
}
