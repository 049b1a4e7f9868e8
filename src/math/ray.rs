//! Ray type and operations

use crate::core::types::Vec3;
use super::aabb::Aabb;

/// Below this the ray is treated as parallel to a triangle
const PARALLEL_EPSILON: f32 = 1e-8;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: Vec3,
}

/// Ray-triangle intersection result
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter at the hit
    pub t: f32,
    /// Barycentric weights of the second and third vertices
    pub u: f32,
    pub v: f32,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
        }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-AABB intersection using slab method
    /// Returns Some((t_near, t_far)) if intersection, None otherwise
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<(f32, f32)> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near <= t_far && t_far >= 0.0 {
            Some((t_near.max(0.0), t_far))
        } else {
            None
        }
    }

    /// Möller–Trumbore ray-triangle test.
    ///
    /// Only front faces hit when `cull_back_faces` is set; the front side is the
    /// one a counter-clockwise `(a, b, c)` winding faces, i.e. `(b - a) × (c - a)`.
    pub fn intersects_triangle(
        &self,
        a: Vec3,
        b: Vec3,
        c: Vec3,
        cull_back_faces: bool,
    ) -> Option<TriangleHit> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);

        if cull_back_faces {
            // det > 0 means the ray travels against the face normal
            if det < PARALLEL_EPSILON {
                return None;
            }
        } else if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t >= 0.0).then_some(TriangleHit { t, u, v })
    }
}
