//! Surface mesh storage and the seam to whatever renders it.

use bytemuck::{Pod, Zeroable};

use crate::core::types::{Rgba, Vec2, Vec3};
use crate::math::Aabb;

/// Complete surface mesh: geometry, derived attributes, and colors.
///
/// Normals and bounds are derived data; call [`Mesh::recalculate_normals`]
/// and [`Mesh::recalculate_bounds`] after touching positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
    pub colors: Vec<Rgba>,
    pub bounds: Aabb,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Drop every buffer
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.indices.clear();
        self.colors.clear();
        self.bounds = Aabb::default();
    }

    /// Smooth per-vertex normals from the current triangles.
    ///
    /// Face normals are accumulated unnormalized, so larger triangles weigh
    /// more. Vertices with no usable faces fall back to +Y.
    pub fn recalculate_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let a = self.positions[ia];
            let b = self.positions[ib];
            let c = self.positions[ic];
            let face = (b - a).cross(c - a);
            self.normals[ia] += face;
            self.normals[ib] += face;
            self.normals[ic] += face;
        }

        for n in &mut self.normals {
            *n = n.try_normalize().unwrap_or(Vec3::Y);
        }
    }

    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.positions);
    }

    /// Positions of triangle `i`
    pub fn triangle(&self, i: usize) -> [Vec3; 3] {
        let tri = &self.indices[i * 3..i * 3 + 3];
        [
            self.positions[tri[0] as usize],
            self.positions[tri[1] as usize],
            self.positions[tri[2] as usize],
        ]
    }
}

/// Receives each finished mesh. Only complete meshes are ever uploaded.
pub trait MeshSink {
    fn upload(&mut self, mesh: &Mesh);
}

/// Collision representation kept in step with the surface.
///
/// Callers always [`clear`](CollisionSink::clear) before
/// [`assign`](CollisionSink::assign) so the shape is rebuilt from scratch.
pub trait CollisionSink {
    fn clear(&mut self);
    fn assign(&mut self, mesh: &Mesh);
}

impl MeshSink for Mesh {
    fn upload(&mut self, mesh: &Mesh) {
        self.clone_from(mesh);
    }
}

/// GPU-ready interleaved vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl PackedVertex {
    /// Byte stride of one vertex
    pub const STRIDE: usize = std::mem::size_of::<PackedVertex>();
}

/// Mesh sink that packs uploads into interleaved vertex and index buffers
#[derive(Debug, Default)]
pub struct PackedMeshSink {
    vertices: Vec<PackedVertex>,
    indices: Vec<u32>,
    bounds: Aabb,
    uploads: u64,
}

impl PackedMeshSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[PackedVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Number of meshes received so far
    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}

impl MeshSink for PackedMeshSink {
    fn upload(&mut self, mesh: &Mesh) {
        let n = mesh.vertex_count();
        self.vertices.clear();
        self.vertices.extend((0..n).map(|i| PackedVertex {
            position: mesh.positions[i].to_array(),
            normal: mesh.normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
            uv: mesh.uvs.get(i).copied().unwrap_or(Vec2::ZERO).to_array(),
            color: mesh.colors.get(i).copied().unwrap_or([1.0; 4]),
        }));
        self.indices.clear();
        self.indices.extend_from_slice(&mesh.indices);
        self.bounds = mesh.bounds;
        self.uploads += 1;
    }
}
