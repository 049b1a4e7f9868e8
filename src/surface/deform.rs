//! Height deformation of the grid by a scalar field.

use rayon::prelude::*;

use super::field::ScalarField;
use super::mesh::Mesh;
use crate::core::types::Vec3;
use crate::core::{Error, Result};

/// Vertices per rayon task; below this splitting costs more than it saves
const MIN_VERTICES_PER_TASK: usize = 4096;

/// Writes `field(x / scale, z / scale, t) * height_multiplier` into the Y of every vertex
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceDeformer {
    pub field: ScalarField,
    /// Divisor applied to planar coordinates before field evaluation
    pub scale: f32,
    pub height_multiplier: f32,
}

impl SurfaceDeformer {
    pub fn new(field: ScalarField, scale: f32, height_multiplier: f32) -> Result<Self> {
        if !scale.is_finite() || scale == 0.0 {
            return Err(Error::config(format!("field scale must be finite and non-zero, got {}", scale)));
        }
        if !height_multiplier.is_finite() {
            return Err(Error::config(format!(
                "height multiplier must be finite, got {}",
                height_multiplier
            )));
        }
        Ok(Self { field, scale, height_multiplier })
    }

    /// Height of the surface above planar point `(x, z)` at time `t`
    #[inline]
    pub fn height_at(&self, x: f32, z: f32, t: f32) -> f32 {
        self.field.evaluate(x / self.scale, z / self.scale, t) * self.height_multiplier
    }

    /// Overwrite vertex heights in place. Each vertex reads and writes only itself.
    pub fn apply(&self, positions: &mut [Vec3], t: f32) {
        positions
            .par_iter_mut()
            .with_min_len(MIN_VERTICES_PER_TASK)
            .for_each(|p| p.y = self.height_at(p.x, p.z, t));
    }

    /// Deform a mesh and refresh its normals and bounds
    pub fn deform(&self, mesh: &mut Mesh, t: f32) {
        self.apply(&mut mesh.positions, t);
        mesh.recalculate_normals();
        mesh.recalculate_bounds();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::grid::{GridParams, GridTopology};

    fn grid_mesh(resolution: u32, size: f32) -> Mesh {
        let topo = GridTopology::build(GridParams::new(resolution, size).unwrap());
        Mesh {
            positions: topo.positions,
            uvs: topo.uvs,
            indices: topo.indices,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(SurfaceDeformer::new(ScalarField::Sine, 0.0, 1.0), Err(Error::Config(_))));
        assert!(matches!(SurfaceDeformer::new(ScalarField::Sine, f32::INFINITY, 1.0), Err(Error::Config(_))));
        assert!(matches!(SurfaceDeformer::new(ScalarField::Sine, 1.0, f32::NAN), Err(Error::Config(_))));
        assert!(SurfaceDeformer::new(ScalarField::Sine, -2.0, 0.0).is_ok());
    }

    #[test]
    fn test_heights_follow_formula() {
        let deformer = SurfaceDeformer::new(ScalarField::Sine2D, 2.0, 3.0).unwrap();
        let mut mesh = grid_mesh(4, 4.0);
        let t = 0.3;
        deformer.deform(&mut mesh, t);

        for p in &mesh.positions {
            let expected = ScalarField::Sine2D.evaluate(p.x / 2.0, p.z / 2.0, t) * 3.0;
            assert_eq!(p.y, expected);
        }
    }

    #[test]
    fn test_planar_coordinates_untouched() {
        let deformer = SurfaceDeformer::new(ScalarField::Ripple, 1.0, 1.0).unwrap();
        let mut mesh = grid_mesh(3, 6.0);
        let before = mesh.positions.clone();
        deformer.deform(&mut mesh, 1.7);
        for (a, b) in before.iter().zip(&mesh.positions) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.z, b.z);
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let deformer = SurfaceDeformer::new(ScalarField::MultiSine2D, 0.5, 2.0).unwrap();
        let mut a = grid_mesh(96, 10.0);
        let mut b = grid_mesh(96, 10.0);
        deformer.deform(&mut a, 4.2);
        deformer.deform(&mut b, 4.2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ripple_center_vertex() {
        // Even resolution puts a vertex exactly at the origin
        let deformer = SurfaceDeformer::new(ScalarField::Ripple, 1.0, 2.0).unwrap();
        let mut mesh = grid_mesh(4, 4.0);
        let t = 0.5;
        deformer.deform(&mut mesh, t);
        let center = mesh.positions[2 * 5 + 2];
        assert_eq!((center.x, center.z), (0.0, 0.0));
        let expected = -0.1 * (std::f32::consts::PI * t).sin() * 2.0;
        assert!((center.y - expected).abs() < 1e-6);
    }

    #[test]
    fn test_normals_and_bounds_refreshed() {
        let deformer = SurfaceDeformer::new(ScalarField::Sine, 1.0, 1.0).unwrap();
        let mut mesh = grid_mesh(8, 4.0);
        deformer.deform(&mut mesh, 0.0);

        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert!(mesh.normals.iter().all(|n| n.y > 0.0));
        let max_y = mesh.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let min_y = mesh.positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert_eq!(mesh.bounds.max.y, max_y);
        assert_eq!(mesh.bounds.min.y, min_y);
        assert!(max_y > min_y);
    }

    #[test]
    fn test_zero_multiplier_flattens() {
        let deformer = SurfaceDeformer::new(ScalarField::Sine2D, 1.0, 0.0).unwrap();
        let mut mesh = grid_mesh(4, 2.0);
        deformer.deform(&mut mesh, 0.25);
        assert!(mesh.positions.iter().all(|p| p.y == 0.0));
    }
}
