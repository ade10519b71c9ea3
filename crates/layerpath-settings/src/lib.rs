//! layerpath Settings Crate
//!
//! Handles configuration files, validation, and conversion into toolpath
//! parameters.

pub mod config;
pub mod error;

pub use config::{
    Config, ContourSettings, MotionSettings, OutputSettings, SlicingSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
