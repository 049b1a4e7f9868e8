//! Triangle-mesh collision shapes and ray queries

pub mod layer;
pub mod collider;
pub mod world;

pub use layer::LayerMask;
pub use collider::{MeshCollider, RayHit, TriMeshShape};
pub use world::{CollisionWorld, ColliderId, RaycastQuery};
