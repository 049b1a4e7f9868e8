//! Regular grid topology for the deformable plane.
//!
//! A grid of resolution `R` has `(R + 1)²` vertices laid out row by row in the
//! XZ plane, centered on the origin, and `R²` quads split into two triangles
//! each. Vertex `(x, y)` lives at linear index `y * (R + 1) + x`.

use crate::core::types::{Vec2, Vec3};
use crate::core::{Error, Result};

/// Shape of the grid: subdivision count and world extent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    /// Quads per side (R)
    pub resolution: u32,
    /// World-space side length of the plane (S)
    pub size: f32,
}

impl GridParams {
    /// Validate and construct. Fails on `R == 0`, non-positive or non-finite `S`,
    /// or grids whose vertex count would overflow a `u32` index.
    pub fn new(resolution: u32, size: f32) -> Result<Self> {
        if resolution == 0 {
            return Err(Error::config("grid resolution must be at least 1"));
        }
        if !size.is_finite() || size <= 0.0 {
            return Err(Error::config(format!("grid size must be positive, got {}", size)));
        }
        let side = resolution as u64 + 1;
        if side * side > u32::MAX as u64 {
            return Err(Error::config(format!(
                "grid resolution {} exceeds 32-bit vertex indexing",
                resolution
            )));
        }
        Ok(Self { resolution, size })
    }

    /// Vertices per row (R + 1)
    #[inline]
    pub fn vertices_per_side(&self) -> usize {
        self.resolution as usize + 1
    }

    /// (R + 1)²
    pub fn vertex_count(&self) -> usize {
        self.vertices_per_side() * self.vertices_per_side()
    }

    /// 6·R² index entries (two triangles per quad)
    pub fn index_count(&self) -> usize {
        let r = self.resolution as usize;
        6 * r * r
    }

    /// Distance between neighbouring vertices
    pub fn step_size(&self) -> f32 {
        self.size / self.resolution as f32
    }

    /// Linear vertex index of grid coordinate `(x, y)`
    #[inline]
    pub fn vertex_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.vertices_per_side() + x as usize
    }
}

/// Static part of the surface: flat positions, UVs, and triangle indices.
///
/// Depends only on [`GridParams`], so it is built once and reused for every
/// frame until the grid shape changes.
#[derive(Clone, Debug, PartialEq)]
pub struct GridTopology {
    params: GridParams,
    /// Undeformed positions (Y = 0)
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl GridTopology {
    /// Build all three buffers. Nothing is returned unless every buffer is complete.
    pub fn build(params: GridParams) -> Self {
        let r = params.resolution;
        let size = params.size;
        let step = params.step_size();
        let half = size * 0.5;

        let mut positions = Vec::with_capacity(params.vertex_count());
        let mut uvs = Vec::with_capacity(params.vertex_count());
        for y in 0..=r {
            for x in 0..=r {
                let x_pos = x as f32 * step - half;
                let z_pos = y as f32 * step - half;
                positions.push(Vec3::new(x_pos, 0.0, z_pos));
                uvs.push(Vec2::new(x as f32 * step / size, y as f32 * step / size));
            }
        }

        let row = r + 1;
        let mut indices = Vec::with_capacity(params.index_count());
        let mut vi = 0u32;
        for _y in 0..r {
            for _x in 0..r {
                indices.extend_from_slice(&[vi, vi + row, vi + 1, vi + 1, vi + row, vi + row + 1]);
                vi += 1;
            }
            // skip the last vertex of the row, it starts no quad
            vi += 1;
        }

        debug_assert_eq!(positions.len(), params.vertex_count());
        debug_assert_eq!(indices.len(), params.index_count());

        Self { params, positions, uvs, indices }
    }

    pub fn params(&self) -> GridParams {
        self.params
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
