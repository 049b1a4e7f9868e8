//! Height-to-color mapping for vertex colors.

use rayon::prelude::*;

use super::gradient::{inverse_lerp, Gradient};
use super::mesh::Mesh;
use crate::core::types::{Rgba, Vec3};

const MIN_VERTICES_PER_TASK: usize = 4096;

/// Height of `height` within `[0, height_multiplier]`, clamped to `[0, 1]`.
/// A zero multiplier maps everything to 0.
#[inline]
pub fn normalized_height(height: f32, height_multiplier: f32) -> f32 {
    inverse_lerp(0.0, height_multiplier, height)
}

/// Fill `colors` with one gradient sample per position
pub fn colorize(
    positions: &[Vec3],
    height_multiplier: f32,
    gradient: &Gradient<Rgba>,
    colors: &mut Vec<Rgba>,
) {
    colors.clear();
    colors.resize(positions.len(), [0.0; 4]);
    colors
        .par_iter_mut()
        .zip(positions.par_iter())
        .with_min_len(MIN_VERTICES_PER_TASK)
        .for_each(|(color, p)| {
            *color = gradient.evaluate(normalized_height(p.y, height_multiplier));
        });
}

/// Recolor a mesh from its current heights
pub fn colorize_mesh(mesh: &mut Mesh, height_multiplier: f32, gradient: &Gradient<Rgba>) {
    colorize(&mesh.positions, height_multiplier, gradient, &mut mesh.colors);
}
