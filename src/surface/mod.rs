//! Animated grid surface: topology, height fields, deformation, coloring,
//! and the per-frame driver tying them together.

pub mod config;
pub mod field;
pub mod grid;
pub mod gradient;
pub mod mesh;
pub mod deform;
pub mod colorize;
pub mod driver;
pub mod snapshot;

pub use config::SurfaceConfig;
pub use field::ScalarField;
pub use grid::{GridParams, GridTopology};
pub use gradient::{Gradient, GradientMode, Lerp};
pub use mesh::{CollisionSink, Mesh, MeshSink, PackedMeshSink, PackedVertex};
pub use deform::SurfaceDeformer;
pub use colorize::{colorize, colorize_mesh, normalized_height};
pub use driver::{FrameDriver, FrameStats};
pub use snapshot::{color_image, save_color_snapshot};
