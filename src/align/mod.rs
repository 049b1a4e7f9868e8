//! Orientation alignment against the ground below an object.
//!
//! Independent of the surface pipeline: it only needs a position, an
//! orientation, and something implementing [`RaycastQuery`](crate::physics::RaycastQuery).

pub mod aligner;

pub use aligner::SurfaceAligner;
