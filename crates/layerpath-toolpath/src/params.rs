//! Toolpath generation parameters.

use crate::deposition::DepositionSettings;
use layerpath_core::Point;
use serde::{Deserialize, Serialize};

/// Validated parameters for one conversion run
///
/// Ranges are checked by the settings layer before a run starts. The
/// pipeline assumes `layer_height > 0`, `feed_rate > 0`, `trim_distance >= 0`
/// and `min_spacing > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathParameters {
    /// Vertical spacing between layers in mm
    pub layer_height: f64,
    /// Feed rate in mm/min
    pub feed_rate: u32,
    /// Fixed start reference for the first layer, or every layer when
    /// `auto_start` is off
    pub reference: Point,
    /// Arc length removed from the end of each loop in mm
    pub trim_distance: f64,
    /// Minimum planar distance between kept points in mm
    pub min_spacing: f64,
    pub deposition: DepositionSettings,
    /// Start each layer near the previous layer's start
    pub auto_start: bool,
    /// Terminate the program with `M30`
    pub program_end: bool,
}

impl Default for ToolpathParameters {
    fn default() -> Self {
        Self {
            layer_height: 30.0,
            feed_rate: 2000,
            reference: Point::new(0.0, 0.0),
            trim_distance: 30.0,
            min_spacing: 3.0,
            deposition: DepositionSettings::default(),
            auto_start: false,
            program_end: false,
        }
    }
}
