//! PNG snapshots of vertex colors, one pixel per grid vertex

use std::path::Path;

use image::{Rgba as Pixel, RgbaImage};

use super::grid::GridParams;
use super::mesh::Mesh;
use crate::core::{Error, Result};

/// Lay the mesh's vertex colors out as a `(R+1) x (R+1)` image, grid row 0 on top
pub fn color_image(mesh: &Mesh, params: GridParams) -> Result<RgbaImage> {
    let side = params.vertices_per_side();
    if mesh.colors.len() != side * side {
        return Err(Error::Image(format!(
            "mesh has {} colors, grid needs {}",
            mesh.colors.len(),
            side * side
        )));
    }

    let side = side as u32;
    Ok(RgbaImage::from_fn(side, side, |x, y| {
        let c = mesh.colors[params.vertex_index(x, y)];
        Pixel(c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8))
    }))
}

/// Write [`color_image`] to `path`; the format follows the extension
pub fn save_color_snapshot(mesh: &Mesh, params: GridParams, path: &Path) -> Result<()> {
    let image = color_image(mesh, params)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image
        .save(path)
        .map_err(|e| Error::Image(format!("{}: {}", path.display(), e)))?;
    log::info!("Wrote color snapshot {}", path.display());
    Ok(())
}
