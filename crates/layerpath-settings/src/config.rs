//! Configuration management for layerpath
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files, selected by extension.
//!
//! Configuration is organized into logical sections:
//! - Slicing (layer height, optional model height override)
//! - Motion (feed rate, start reference)
//! - Contour processing (trim, spacing, cross-layer continuity)
//! - Deposition (rate, accounting mode, loop resets)
//! - Output (program end)

use crate::error::{ConfigError, ConfigResult, SettingsResult};
use layerpath_core::Point;
use layerpath_toolpath::{DepositionSettings, ToolpathParameters};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Layer schedule settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicingSettings {
    /// Vertical distance between layers in mm
    pub layer_height: f64,
    /// Model height in mm. Taken from the contour source when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_max: Option<f64>,
}

impl Default for SlicingSettings {
    fn default() -> Self {
        Self {
            layer_height: 30.0,
            z_max: None,
        }
    }
}

/// Motion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Feed rate in mm/min
    pub feed_rate: u32,
    /// Fixed start reference `[x, y]`
    pub reference: Point,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            feed_rate: 2000,
            reference: Point::new(0.0, 0.0),
        }
    }
}

/// Per-loop processing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourSettings {
    /// Arc length removed from the end of each loop in mm
    pub trim_distance: f64,
    /// Minimum planar spacing between kept points in mm
    pub min_spacing: f64,
    /// Start each layer near the previous layer's start
    pub auto_start: bool,
}

impl Default for ContourSettings {
    fn default() -> Self {
        Self {
            trim_distance: 30.0,
            min_spacing: 3.0,
            auto_start: false,
        }
    }
}

/// Program output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputSettings {
    /// Append `M30` after the footer
    pub program_end: bool,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub slicing: SlicingSettings,
    pub motion: MotionSettings,
    pub contour: ContourSettings,
    pub deposition: DepositionSettings,
    pub output: OutputSettings,
}

impl Config {
    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(unsupported_format(path).into());
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(unsupported_format(path).into());
        };

        std::fs::write(path, content)?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let layer_height = self.slicing.layer_height;
        if !layer_height.is_finite() || layer_height <= 0.0 {
            return Err(ConfigError::out_of_range("slicing.layer_height", layer_height));
        }

        if let Some(z_max) = self.slicing.z_max.filter(|z| !z.is_finite()) {
            return Err(ConfigError::out_of_range("slicing.z_max", z_max));
        }

        if self.motion.feed_rate == 0 {
            return Err(ConfigError::out_of_range("motion.feed_rate", 0));
        }

        let reference = self.motion.reference;
        if !reference.x.is_finite() || !reference.y.is_finite() {
            return Err(ConfigError::out_of_range("motion.reference", reference));
        }

        let trim = self.contour.trim_distance;
        if !trim.is_finite() || trim < 0.0 {
            return Err(ConfigError::out_of_range("contour.trim_distance", trim));
        }

        let spacing = self.contour.min_spacing;
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(ConfigError::out_of_range("contour.min_spacing", spacing));
        }

        let rate = self.deposition.rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::out_of_range("deposition.rate", rate));
        }

        let start_value = self.deposition.loop_start_value;
        if !start_value.is_finite() || start_value < 0.0 {
            return Err(ConfigError::out_of_range(
                "deposition.loop_start_value",
                start_value,
            ));
        }

        Ok(())
    }

    /// Parameters for one toolpath run.
    ///
    /// Loop resets only take effect while deposition is enabled.
    pub fn to_parameters(&self) -> ToolpathParameters {
        let enabled = self.deposition.enabled;
        ToolpathParameters {
            layer_height: self.slicing.layer_height,
            feed_rate: self.motion.feed_rate,
            reference: self.motion.reference.planar(),
            trim_distance: self.contour.trim_distance,
            min_spacing: self.contour.min_spacing,
            deposition: DepositionSettings {
                reset_at_loop_start: enabled && self.deposition.reset_at_loop_start,
                reset_at_loop_end: enabled && self.deposition.reset_at_loop_end,
                ..self.deposition
            },
            auto_start: self.contour.auto_start,
            program_end: self.output.program_end,
        }
    }
}

fn unsupported_format(path: &Path) -> ConfigError {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "no extension".to_string());
    ConfigError::UnsupportedFormat(format!("{} (config file must be .json or .toml)", ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerpath_toolpath::DepositionMode;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.slicing.layer_height, 30.0);
        assert_eq!(config.slicing.z_max, None);
        assert_eq!(config.motion.feed_rate, 2000);
        assert_eq!(config.motion.reference, Point::new(0.0, 0.0));
        assert_eq!(config.contour.trim_distance, 30.0);
        assert_eq!(config.contour.min_spacing, 3.0);
        assert!(!config.contour.auto_start);
        assert!(!config.deposition.enabled);
        assert_eq!(config.deposition.rate, 0.05);
        assert_eq!(config.deposition.mode, DepositionMode::PerSegment);
        assert!(!config.output.program_end);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let cases: Vec<(&str, Box<dyn Fn(&mut Config)>)> = vec![
            ("slicing.layer_height", Box::new(|c: &mut Config| c.slicing.layer_height = 0.0)),
            ("slicing.z_max", Box::new(|c: &mut Config| c.slicing.z_max = Some(f64::NAN))),
            ("motion.feed_rate", Box::new(|c: &mut Config| c.motion.feed_rate = 0)),
            ("contour.trim_distance", Box::new(|c: &mut Config| c.contour.trim_distance = -1.0)),
            ("contour.min_spacing", Box::new(|c: &mut Config| c.contour.min_spacing = 0.0)),
            ("deposition.rate", Box::new(|c: &mut Config| c.deposition.rate = -0.1)),
            (
                "deposition.loop_start_value",
                Box::new(|c: &mut Config| c.deposition.loop_start_value = -0.5),
            ),
        ];

        for (expected_key, mutate) in cases {
            let mut config = Config::default();
            mutate(&mut config);
            match config.validate() {
                Err(ConfigError::ValueOutOfRange { key, .. }) => assert_eq!(key, expected_key),
                other => panic!("expected {} to be rejected, got {:?}", expected_key, other),
            }
        }
    }

    #[test]
    fn test_validate_accepts_edges() {
        let mut config = Config::default();
        config.contour.trim_distance = 0.0;
        config.deposition.rate = 0.0;
        config.slicing.z_max = Some(65.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_parameters_gates_resets() {
        let mut config = Config::default();
        config.deposition.reset_at_loop_start = true;
        config.deposition.reset_at_loop_end = true;

        let params = config.to_parameters();
        assert!(!params.deposition.reset_at_loop_start);
        assert!(!params.deposition.reset_at_loop_end);

        config.deposition.enabled = true;
        let params = config.to_parameters();
        assert!(params.deposition.reset_at_loop_start);
        assert!(params.deposition.reset_at_loop_end);
    }

    #[test]
    fn test_to_parameters_copies_sections() {
        let mut config = Config::default();
        config.slicing.layer_height = 0.5;
        config.motion.feed_rate = 1200;
        config.motion.reference = Point::with_z(3.0, 4.0, 9.0);
        config.contour.auto_start = true;
        config.output.program_end = true;

        let params = config.to_parameters();
        assert_eq!(params.layer_height, 0.5);
        assert_eq!(params.feed_rate, 1200);
        assert_eq!(params.reference, Point::new(3.0, 4.0));
        assert!(params.auto_start);
        assert!(params.program_end);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [contour]
            trim_distance = 5.0

            [deposition]
            enabled = true
            mode = "cumulative"
            "#,
        )
        .unwrap();
        assert_eq!(config.contour.trim_distance, 5.0);
        assert_eq!(config.contour.min_spacing, 3.0);
        assert!(config.deposition.enabled);
        assert_eq!(config.deposition.mode, DepositionMode::Cumulative);
        assert_eq!(config.deposition.rate, 0.05);
    }
}
