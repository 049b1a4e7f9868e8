//! Collections of colliders and filtered ray queries

use super::collider::{MeshCollider, RayHit};
use super::layer::LayerMask;
use crate::math::Ray;

/// Anything that can answer "what does this ray hit first"
pub trait RaycastQuery {
    /// Nearest hit within `max_distance` on colliders whose layer intersects `mask`
    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit>;
}

/// Handle to a collider in a [`CollisionWorld`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColliderId(usize);

/// Flat list of colliders queried by brute force
#[derive(Debug, Default)]
pub struct CollisionWorld {
    colliders: Vec<MeshCollider>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collider: MeshCollider) -> ColliderId {
        self.colliders.push(collider);
        ColliderId(self.colliders.len() - 1)
    }

    pub fn get(&self, id: ColliderId) -> Option<&MeshCollider> {
        self.colliders.get(id.0)
    }

    pub fn get_mut(&mut self, id: ColliderId) -> Option<&mut MeshCollider> {
        self.colliders.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl RaycastQuery for CollisionWorld {
    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        self.colliders
            .iter()
            .filter(|c| c.layer().intersects(mask))
            .filter_map(|c| c.raycast(ray, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl RaycastQuery for MeshCollider {
    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        if !self.layer().intersects(mask) {
            return None;
        }
        MeshCollider::raycast(self, ray, max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::surface::mesh::{CollisionSink, Mesh};

    fn square_collider(y: f32, layer: LayerMask) -> MeshCollider {
        let mesh = Mesh {
            positions: vec![
                Vec3::new(-1.0, y, -1.0),
                Vec3::new(1.0, y, -1.0),
                Vec3::new(-1.0, y, 1.0),
                Vec3::new(1.0, y, 1.0),
            ],
            indices: vec![0, 2, 1, 1, 2, 3],
            ..Default::default()
        };
        let mut collider = MeshCollider::new(layer);
        collider.clear();
        collider.assign(&mesh);
        collider
    }

    #[test]
    fn test_mask_filters_colliders() {
        let ground = LayerMask::layer(6);
        let props = LayerMask::layer(2);

        let mut world = CollisionWorld::new();
        world.insert(square_collider(0.0, ground));
        world.insert(square_collider(1.0, props));
        assert_eq!(world.len(), 2);

        let ray = Ray::new(Vec3::new(0.3, 5.0, 0.2), Vec3::NEG_Y);

        let hit = world.raycast(&ray, f32::INFINITY, ground).unwrap();
        assert!((hit.point.y - 0.0).abs() < 1e-5);

        let hit = world.raycast(&ray, f32::INFINITY, ground | props).unwrap();
        assert!((hit.point.y - 1.0).abs() < 1e-5);

        assert!(world.raycast(&ray, f32::INFINITY, LayerMask::layer(9)).is_none());
    }

    #[test]
    fn test_collider_as_query_respects_mask() {
        let collider = square_collider(0.0, LayerMask::DEFAULT);
        let ray = Ray::new(Vec3::new(0.3, 1.0, 0.2), Vec3::NEG_Y);
        assert!(RaycastQuery::raycast(&collider, &ray, 2.0, LayerMask::ALL).is_some());
        assert!(RaycastQuery::raycast(&collider, &ray, 2.0, LayerMask::layer(5)).is_none());
    }

    #[test]
    fn test_get_mut_allows_resync() {
        let mut world = CollisionWorld::new();
        let id = world.insert(MeshCollider::default());
        let ray = Ray::new(Vec3::new(-0.5, 1.0, -0.5), Vec3::NEG_Y);
        assert!(world.raycast(&ray, 5.0, LayerMask::ALL).is_none());

        let triangle = Mesh {
            positions: vec![Vec3::new(-1.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1.0)],
            indices: vec![0, 1, 2],
            ..Default::default()
        };
        let slot = world.get_mut(id).unwrap();
        slot.clear();
        slot.assign(&triangle);
        assert!(world.raycast(&ray, 5.0, LayerMask::ALL).is_some());
        assert_eq!(world.get(id).unwrap().rebuilds(), 1);
    }
}
