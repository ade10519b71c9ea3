//! Contour sources
//!
//! The pipeline never intersects meshes itself. It asks a [`Slicer`] for the
//! loops at each height, which may be a closure wrapping a mesh library
//! or a [`ContourSet`] loaded from a file of precomputed sections.

use layerpath_core::{Contour, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Heights closer than this are treated as the same section.
pub const HEIGHT_TOLERANCE: f64 = 1e-6;

/// Supplies the contour loops of a model at a given height
pub trait Slicer {
    /// Loops at `height`, in slicer order.
    ///
    /// `None` means the plane misses the model and the layer is skipped
    /// entirely. `Some` with no loops still produces the layer boundary.
    fn slice(&self, height: f64) -> Option<Vec<Contour>>;
}

impl<F> Slicer for F
where
    F: Fn(f64) -> Option<Vec<Contour>>,
{
    fn slice(&self, height: f64) -> Option<Vec<Contour>> {
        self(height)
    }
}

/// Loops of one precomputed section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerContours {
    pub z: f64,
    #[serde(default)]
    pub loops: Vec<Contour>,
}

/// Precomputed sections of a model
///
/// ```json
/// {"z_max": 65.0, "layers": [{"z": 30.0, "loops": [[[0, 0], [10, 0], [10, 10]]]}]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourSet {
    /// Model height. Defaults to the highest section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_max: Option<f64>,
    #[serde(default)]
    pub layers: Vec<LayerContours>,
}

impl ContourSet {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json_str(&content)?;
        debug!(
            "Loaded {} sections from {}",
            set.layers.len(),
            path.display()
        );
        Ok(set)
    }

    /// Declared model height, or the highest section height.
    pub fn model_height(&self) -> Option<f64> {
        self.z_max.or_else(|| {
            self.layers
                .iter()
                .map(|layer| layer.z)
                .reduce(f64::max)
        })
    }
}

impl Slicer for ContourSet {
    fn slice(&self, height: f64) -> Option<Vec<Contour>> {
        self.layers
            .iter()
            .find(|layer| (layer.z - height).abs() < HEIGHT_TOLERANCE)
            .map(|layer| layer.loops.clone())
    }
}
