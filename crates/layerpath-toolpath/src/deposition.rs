//! Deposition accounting
//!
//! Computes the material-feed (`E`) value attached to each motion segment.

use layerpath_core::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How deposition values are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositionMode {
    /// Running total over the whole run (absolute extruder, `M82`)
    Cumulative,
    /// Each segment's own amount (relative extruder, `M83`)
    #[default]
    PerSegment,
}

impl fmt::Display for DepositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cumulative => write!(f, "cumulative"),
            Self::PerSegment => write!(f, "per-segment"),
        }
    }
}

/// Deposition configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepositionSettings {
    /// Emit deposition values at all
    pub enabled: bool,
    /// Material per millimeter of planar travel
    pub rate: f64,
    /// Accounting mode
    pub mode: DepositionMode,
    /// Attach a deposition value to the travel move that starts each loop
    pub reset_at_loop_start: bool,
    /// Value carried by that travel move
    pub loop_start_value: f64,
    /// Emit `G01 E0` after each loop
    pub reset_at_loop_end: bool,
}

impl Default for DepositionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            rate: 0.05,
            mode: DepositionMode::PerSegment,
            reset_at_loop_start: false,
            loop_start_value: 0.0,
            reset_at_loop_end: false,
        }
    }
}

/// Running deposition state for one conversion run
#[derive(Debug, Clone)]
pub struct DepositionAccumulator {
    settings: DepositionSettings,
    run_total: f64,
    loop_total: f64,
}

impl DepositionAccumulator {
    pub fn new(settings: DepositionSettings) -> Self {
        Self {
            settings,
            run_total: 0.0,
            loop_total: 0.0,
        }
    }

    /// Value for the travel move that opens a loop, if one is configured.
    pub fn begin_loop(&mut self) -> Option<f64> {
        self.loop_total = 0.0;
        (self.settings.enabled && self.settings.reset_at_loop_start)
            .then_some(self.settings.loop_start_value)
    }

    /// Deposition value for the motion segment `from -> to`.
    ///
    /// The amount is the planar segment length times the rate. `None` when
    /// deposition is disabled.
    pub fn segment(&mut self, from: &Point, to: &Point) -> Option<f64> {
        if !self.settings.enabled {
            return None;
        }
        let amount = from.planar_distance(to) * self.settings.rate;
        self.run_total += amount;
        self.loop_total += amount;
        match self.settings.mode {
            DepositionMode::Cumulative => Some(self.run_total),
            DepositionMode::PerSegment => Some(amount),
        }
    }

    /// Whether a loop closure emits an explicit reset.
    pub fn resets_at_loop_end(&self) -> bool {
        self.settings.enabled && self.settings.reset_at_loop_end
    }

    /// Amount deposited since the last [`begin_loop`](Self::begin_loop).
    pub fn loop_total(&self) -> f64 {
        self.loop_total
    }

    /// Amount deposited since the start of the run.
    pub fn run_total(&self) -> f64 {
        self.run_total
    }
}
