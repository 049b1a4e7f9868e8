//! Triangle-mesh collider rebuilt from the surface every frame

use super::layer::LayerMask;
use crate::core::types::Vec3;
use crate::math::{Aabb, Ray};
use crate::surface::mesh::{CollisionSink, Mesh};

/// Slack added around the shape bounds so flat meshes still pass the slab test
const BOUNDS_MARGIN: f32 = 1e-4;

/// Nearest ray hit against a collider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
    /// Unit normal of the hit triangle's front face
    pub normal: Vec3,
    pub triangle: usize,
}

/// Immutable copy of mesh geometry used for queries
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriMeshShape {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    bounds: Aabb,
}

impl TriMeshShape {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            positions: mesh.positions.clone(),
            indices: mesh.indices.clone(),
            bounds: Aabb::from_points(&mesh.positions),
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Closest front-face hit within `max_distance`
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        let (t_near, _) = ray.intersects_aabb(&self.bounds.inflated(BOUNDS_MARGIN))?;
        if t_near > max_distance {
            return None;
        }

        let mut best: Option<(f32, usize)> = None;
        for (i, tri) in self.indices.chunks_exact(3).enumerate() {
            let a = self.positions[tri[0] as usize];
            let b = self.positions[tri[1] as usize];
            let c = self.positions[tri[2] as usize];
            if let Some(hit) = ray.intersects_triangle(a, b, c, true) {
                let closer = best.is_none_or(|(t, _)| hit.t < t);
                if hit.t <= max_distance && closer {
                    best = Some((hit.t, i));
                }
            }
        }

        best.map(|(t, i)| {
            let tri = &self.indices[i * 3..i * 3 + 3];
            let a = self.positions[tri[0] as usize];
            let b = self.positions[tri[1] as usize];
            let c = self.positions[tri[2] as usize];
            RayHit {
                distance: t,
                point: ray.at(t),
                normal: (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::Y),
                triangle: i,
            }
        })
    }
}

/// Collider whose shape is replaced wholesale from a [`Mesh`]
#[derive(Clone, Debug)]
pub struct MeshCollider {
    shape: Option<TriMeshShape>,
    layer: LayerMask,
    rebuilds: u64,
}

impl MeshCollider {
    /// Empty collider on the given layer(s)
    pub fn new(layer: LayerMask) -> Self {
        Self {
            shape: None,
            layer,
            rebuilds: 0,
        }
    }

    pub fn layer(&self) -> LayerMask {
        self.layer
    }

    pub fn shape(&self) -> Option<&TriMeshShape> {
        self.shape.as_ref()
    }

    /// Number of times a shape has been assigned
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Ray query against the current shape; an empty collider never hits
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.shape.as_ref()?.raycast(ray, max_distance)
    }
}

impl Default for MeshCollider {
    fn default() -> Self {
        Self::new(LayerMask::DEFAULT)
    }
}

impl CollisionSink for MeshCollider {
    fn clear(&mut self) {
        self.shape = None;
    }

    fn assign(&mut self, mesh: &Mesh) {
        if self.shape.is_some() {
            log::warn!("collider assigned without clear; replacing existing shape");
        }
        self.shape = Some(TriMeshShape::from_mesh(mesh));
        self.rebuilds += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two triangles forming the unit square at height `y`, facing +Y
    fn square(y: f32) -> Mesh {
        Mesh {
            positions: vec![
                Vec3::new(0.0, y, 0.0),
                Vec3::new(1.0, y, 0.0),
                Vec3::new(0.0, y, 1.0),
                Vec3::new(1.0, y, 1.0),
            ],
            indices: vec![0, 2, 1, 1, 2, 3],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_collider_misses() {
        let collider = MeshCollider::default();
        let ray = Ray::new(Vec3::new(0.5, 1.0, 0.5), Vec3::NEG_Y);
        assert!(collider.raycast(&ray, f32::INFINITY).is_none());
    }

    #[test]
    fn test_clear_then_assign() {
        let mut collider = MeshCollider::new(LayerMask::layer(4));
        collider.clear();
        collider.assign(&square(0.0));
        assert_eq!(collider.rebuilds(), 1);
        assert_eq!(collider.shape().map(|s| s.triangle_count()), Some(2));

        collider.clear();
        assert!(collider.shape().is_none());
        collider.assign(&square(2.0));
        assert_eq!(collider.rebuilds(), 2);
        assert_eq!(collider.shape().unwrap().bounds().min.y, 2.0);
    }

    #[test]
    fn test_downward_hit_on_flat_square() {
        let mut collider = MeshCollider::default();
        collider.assign(&square(0.5));
        let ray = Ray::new(Vec3::new(0.3, 3.0, 0.6), Vec3::NEG_Y);
        let hit = collider.raycast(&ray, f32::INFINITY).expect("hit");
        assert!((hit.distance - 2.5).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.3, 0.5, 0.6)).length() < 1e-5);
        assert!((hit.normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_max_distance_and_back_faces() {
        let mut collider = MeshCollider::default();
        collider.assign(&square(0.0));

        let far = Ray::new(Vec3::new(0.4, 10.0, 0.3), Vec3::NEG_Y);
        assert!(collider.raycast(&far, 5.0).is_none());
        assert!(collider.raycast(&far, 10.0).is_some());

        let below = Ray::new(Vec3::new(0.5, -1.0, 0.5), Vec3::Y);
        assert!(collider.raycast(&below, f32::INFINITY).is_none());
    }

    #[test]
    fn test_nearest_of_stacked_surfaces() {
        let mut mesh = square(0.0);
        let upper = square(1.0);
        mesh.positions.extend_from_slice(&upper.positions);
        mesh.indices.extend(upper.indices.iter().map(|i| i + 4));

        let mut collider = MeshCollider::default();
        collider.assign(&mesh);
        let ray = Ray::new(Vec3::new(0.25, 5.0, 0.25), Vec3::NEG_Y);
        let hit = collider.raycast(&ray, f32::INFINITY).unwrap();
        assert!((hit.point.y - 1.0).abs() < 1e-5);
        assert!(hit.triangle >= 2);
    }
}
