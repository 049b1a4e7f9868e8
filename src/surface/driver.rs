//! Per-frame surface regeneration.
//!
//! Each tick runs the same fixed sequence:
//! 1. Take the grid topology (rebuilt only when resolution or size change)
//! 2. Deform heights with the active field at the frame's time
//! 3. Recolor vertices from their heights
//! 4. Upload the finished mesh to the mesh sink
//! 5. Clear the collision sink and reassign it from the new mesh
//!
//! Nothing carries over between ticks except the cached topology, which is a
//! pure function of the grid parameters, so the output of a tick depends only
//! on the configuration and `t`.

use std::time::Instant;

use super::colorize::colorize_mesh;
use super::config::SurfaceConfig;
use super::deform::SurfaceDeformer;
use super::grid::{GridParams, GridTopology};
use super::mesh::{CollisionSink, Mesh, MeshSink};
use crate::core::Result;

/// Timing and size of one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameStats {
    pub t: f32,
    pub vertices: usize,
    pub triangles: usize,
    pub min_height: f32,
    pub max_height: f32,
    pub build_ms: f32,
}

/// Owns the surface mesh and regenerates it once per tick
pub struct FrameDriver {
    config: SurfaceConfig,
    deformer: SurfaceDeformer,
    topology: GridTopology,
    mesh: Mesh,
    ticks: u64,
}

impl FrameDriver {
    /// Validate the configuration and build the grid. Fails fast on a bad config.
    pub fn new(config: SurfaceConfig) -> Result<Self> {
        config.validate()?;
        let params = config.grid_params()?;
        let deformer = config.deformer()?;
        let topology = GridTopology::build(params);

        log::info!(
            "Surface driver: {}x{} quads over {}m, field {}, {} vertices",
            params.resolution,
            params.resolution,
            params.size,
            config.function,
            topology.vertex_count()
        );

        Ok(Self {
            config,
            deformer,
            topology,
            mesh: Mesh::new(),
            ticks: 0,
        })
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Swap in a new configuration. On error the previous one stays active.
    pub fn set_config(&mut self, config: SurfaceConfig) -> Result<()> {
        config.validate()?;
        let params = config.grid_params()?;
        let deformer = config.deformer()?;

        if params != self.topology.params() {
            log::debug!(
                "Grid changed ({} -> {} quads/side), rebuilding topology",
                self.topology.params().resolution,
                params.resolution
            );
            self.topology = GridTopology::build(params);
        }
        if config.function != self.config.function {
            log::info!("Surface field: {} -> {}", self.config.function, config.function);
        }

        self.deformer = deformer;
        self.config = config;
        Ok(())
    }

    pub fn grid_params(&self) -> GridParams {
        self.topology.params()
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// Mesh produced by the last tick (empty before the first)
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Build the complete mesh for time `t` without publishing it
    pub fn regenerate(&mut self, t: f32) -> &Mesh {
        let mesh = &mut self.mesh;

        mesh.positions.clone_from(&self.topology.positions);
        mesh.uvs.clone_from(&self.topology.uvs);
        mesh.indices.clone_from(&self.topology.indices);

        self.deformer.deform(mesh, t);
        colorize_mesh(mesh, self.config.height_multiplier, &self.config.color_gradient);

        &self.mesh
    }

    /// Run one full frame at time `t` and publish to both sinks
    pub fn tick<M, C>(&mut self, t: f32, mesh_sink: &mut M, collision: &mut C) -> FrameStats
    where
        M: MeshSink + ?Sized,
        C: CollisionSink + ?Sized,
    {
        let start = Instant::now();
        self.regenerate(t);

        mesh_sink.upload(&self.mesh);
        collision.clear();
        collision.assign(&self.mesh);

        self.ticks += 1;
        let stats = FrameStats {
            t,
            vertices: self.mesh.vertex_count(),
            triangles: self.mesh.triangle_count(),
            min_height: self.mesh.bounds.min.y,
            max_height: self.mesh.bounds.max.y,
            build_ms: start.elapsed().as_secs_f32() * 1000.0,
        };
        log::trace!(
            "tick {} t={:.3} heights [{:.3}, {:.3}] in {:.2}ms",
            self.ticks,
            t,
            stats.min_height,
            stats.max_height,
            stats.build_ms
        );
        stats
    }
}
