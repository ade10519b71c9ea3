//! # layerpath toolpath
//!
//! Turns per-height contour loops into a deposition-aware G-code program.
//!
//! Each loop is rotated to start near a reference point, trimmed at its tail
//! so the seam does not overlap, and decimated to a minimum point spacing.
//! A continuity tracker carries the start point from one layer to the next
//! and a deposition accumulator computes the `E` value of every move.
//!
//! ```
//! use layerpath_core::{Contour, Point};
//! use layerpath_toolpath::{ToolpathGenerator, ToolpathParameters};
//!
//! let square = Contour::from_points(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ]);
//! let slicer = move |_z: f64| Some(vec![square.clone()]);
//!
//! let params = ToolpathParameters { trim_distance: 5.0, ..Default::default() };
//! let program = ToolpathGenerator::new(params).generate(&slicer, 65.0);
//! assert_eq!(program.stats.layers_emitted, 2);
//! ```

pub mod continuity;
pub mod decimate;
pub mod deposition;
pub mod emitter;
pub mod gcode;
pub mod params;
pub mod pipeline;
pub mod rotate;
pub mod schedule;
pub mod slicer;
pub mod trim;

pub use continuity::ContinuityTracker;
pub use decimate::decimate;
pub use deposition::{DepositionAccumulator, DepositionMode, DepositionSettings};
pub use emitter::{EmitterState, GcodeEmitter};
pub use gcode::Instruction;
pub use params::ToolpathParameters;
pub use pipeline::{Layer, PreparedLoop, ProgramStats, RunState, ToolpathGenerator, ToolpathProgram};
pub use rotate::rotate_to_nearest;
pub use schedule::layer_heights;
pub use slicer::{ContourSet, LayerContours, Slicer, HEIGHT_TOLERANCE};
pub use trim::trim_tail;
