//! Downward-raycast surface alignment

use serde::{Deserialize, Serialize};

use crate::core::types::{Quat, Vec3};
use crate::math::Ray;
use crate::physics::{LayerMask, RaycastQuery};

/// Tilts an object so its up axis matches the ground normal beneath it
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceAligner {
    /// Layers that count as ground
    pub ground: LayerMask,
    /// Longest probe; infinite by default
    pub max_distance: f32,
}

impl SurfaceAligner {
    pub fn new(ground: LayerMask) -> Self {
        Self {
            ground,
            max_distance: f32::INFINITY,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Ray from `position` along the orientation's local down axis
    pub fn probe(&self, position: Vec3, orientation: Quat) -> Ray {
        let down = (orientation * Vec3::NEG_Y).normalize();
        Ray::new(position, down)
    }

    /// Rotation taking world up onto the ground normal below, or `None` when
    /// nothing on the ground layers is hit (the caller keeps its orientation).
    pub fn align<Q: RaycastQuery + ?Sized>(
        &self,
        position: Vec3,
        orientation: Quat,
        query: &Q,
    ) -> Option<Quat> {
        let ray = self.probe(position, orientation);
        log::trace!("alignment probe from {:?} along {:?}", ray.origin, ray.direction);

        let hit = query.raycast(&ray, self.max_distance, self.ground)?;
        Some(Quat::from_rotation_arc(Vec3::Y, hit.normal))
    }

    /// Like [`align`](Self::align) but leaves `target` untouched on a miss.
    /// Returns whether the orientation changed.
    pub fn align_in_place<Q: RaycastQuery + ?Sized>(
        &self,
        position: Vec3,
        probe_orientation: Quat,
        target: &mut Quat,
        query: &Q,
    ) -> bool {
        match self.align(position, probe_orientation, query) {
            Some(rotation) => {
                *target = rotation;
                true
            }
            None => false,
        }
    }
}

impl Default for SurfaceAligner {
    fn default() -> Self {
        Self::new(LayerMask::ALL)
    }
}
