//! Surface configuration: grid shape, field selection, and coloring.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::deform::SurfaceDeformer;
use super::field::{FieldSelector, ScalarField};
use super::gradient::Gradient;
use super::grid::GridParams;
use crate::core::types::Rgba;
use crate::core::{Error, Result};

/// Everything needed to generate and animate one surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Quad subdivisions per side
    pub resolution: u32,
    /// Divisor applied to vertex X/Z before field evaluation
    pub scale: f32,
    /// Multiplier for field output; also the top of the color range
    pub height_multiplier: f32,
    /// World-space side length of the plane
    pub size: f32,
    /// Height-to-color gradient
    pub color_gradient: Gradient<Rgba>,
    /// Active height field
    pub function: ScalarField,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            resolution: 100,
            scale: 1.0,
            height_multiplier: 1.0,
            size: 10.0,
            color_gradient: Gradient::terrain(),
            function: ScalarField::Sine,
        }
    }
}

impl SurfaceConfig {
    /// Grid shape, validated
    pub fn grid_params(&self) -> Result<GridParams> {
        GridParams::new(self.resolution, self.size)
    }

    /// Deformer for the configured field, validated
    pub fn deformer(&self) -> Result<SurfaceDeformer> {
        SurfaceDeformer::new(self.function, self.scale, self.height_multiplier)
    }

    /// Check every setting. Any failure is a configuration error.
    pub fn validate(&self) -> Result<()> {
        self.grid_params()?;
        self.deformer()?;
        self.color_gradient.validate()?;
        if self.height_multiplier == 0.0 {
            log::warn!("height multiplier is zero; every vertex takes the gradient's start color");
        }
        Ok(())
    }

    /// Load and validate a JSON config. Missing fields take their defaults.
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        if let Some(function) = value.get("function") {
            let selector = FieldSelector::deserialize(function).map_err(|_| {
                Error::config(format!("invalid scalar field selector {}", function))
            })?;
            ScalarField::try_from(selector)?;
        }
        let config: SurfaceConfig = serde_json::from_value(value)?;
        config.validate()?;
        log::info!("Loaded surface config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty JSON, creating parent directories
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}
