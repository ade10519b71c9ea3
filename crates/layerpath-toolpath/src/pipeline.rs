//! Layer-by-layer toolpath generation
//!
//! For every scheduled height the generator asks the slicer for loops,
//! orders them for continuity, runs each through rotation, trimming and
//! decimation, and hands the result to the emitter. Cross-layer state lives
//! in a [`RunState`] that is created fresh for every run.

use crate::continuity::ContinuityTracker;
use crate::decimate::decimate;
use crate::deposition::DepositionAccumulator;
use crate::emitter::GcodeEmitter;
use crate::gcode::Instruction;
use crate::params::ToolpathParameters;
use crate::rotate::rotate_to_nearest;
use crate::schedule::layer_heights;
use crate::slicer::Slicer;
use crate::trim::trim_tail;
use layerpath_core::{Contour, Point, Polyline};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, info, trace, warn};

/// One height and the loops the slicer returned for it
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub z: f64,
    pub contours: Vec<Contour>,
}

/// Counters collected over one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgramStats {
    pub layers_emitted: usize,
    /// Heights where the slicer returned no section
    pub layers_skipped: usize,
    pub loops_emitted: usize,
    /// Loops left with fewer than two points after decimation
    pub loops_skipped: usize,
    /// Length of all emitted paths in mm
    pub path_length: f64,
    /// Material deposited over the run
    pub deposition_total: f64,
    /// Largest amount deposited by a single loop
    pub max_loop_deposition: f64,
}

/// Mutable state threaded through the per-layer processing of one run
#[derive(Debug, Clone)]
pub struct RunState {
    pub continuity: ContinuityTracker,
    pub deposition: DepositionAccumulator,
    pub stats: ProgramStats,
}

impl RunState {
    pub fn new(params: &ToolpathParameters) -> Self {
        Self {
            continuity: ContinuityTracker::new(params.auto_start),
            deposition: DepositionAccumulator::new(params.deposition),
            stats: ProgramStats::default(),
        }
    }
}

/// A loop after rotation, trimming and decimation
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedLoop {
    pub path: Polyline,
    /// Ring point the path starts from
    pub pivot: Point,
}

/// Generated program together with its run report
#[derive(Debug, Clone, PartialEq)]
pub struct ToolpathProgram {
    pub instructions: Vec<Instruction>,
    pub stats: ProgramStats,
}

impl ToolpathProgram {
    pub fn lines(&self) -> Vec<String> {
        self.instructions.iter().map(ToString::to_string).collect()
    }

    /// Program text, one instruction per line.
    pub fn to_gcode(&self) -> String {
        self.lines().join("\n")
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.to_gcode().as_bytes())?;
        writer.flush()
    }
}

/// Converts sliced contours into a G-code program
#[derive(Debug, Clone)]
pub struct ToolpathGenerator {
    params: ToolpathParameters,
}

impl ToolpathGenerator {
    pub fn new(params: ToolpathParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ToolpathParameters {
        &self.params
    }

    /// Generates the program for a model of height `z_max`, visiting the
    /// heights from [`layer_heights`].
    pub fn generate<S: Slicer + ?Sized>(&self, slicer: &S, z_max: f64) -> ToolpathProgram {
        let heights = layer_heights(self.params.layer_height, z_max);
        debug!(
            "Scheduled {} layers of {:.3} mm up to Z={:.3}",
            heights.len(),
            self.params.layer_height,
            z_max
        );
        self.generate_at(slicer, &heights)
    }

    /// Generates the program for an explicit ascending list of heights.
    pub fn generate_at<S: Slicer + ?Sized>(&self, slicer: &S, heights: &[f64]) -> ToolpathProgram {
        let mut state = RunState::new(&self.params);
        let mut emitter = GcodeEmitter::new(&self.params);
        emitter.header();

        for &z in heights {
            match slicer.slice(z) {
                Some(contours) => {
                    self.process_layer(&mut state, &mut emitter, &Layer { z, contours });
                }
                None => {
                    warn!("No section at Z={:.3}, layer skipped", z);
                    state.stats.layers_skipped += 1;
                }
            }
        }

        emitter.footer();
        state.stats.deposition_total = state.deposition.run_total();

        info!(
            "Toolpath generated: {} layers, {} loops, {:.3} mm",
            state.stats.layers_emitted, state.stats.loops_emitted, state.stats.path_length
        );

        ToolpathProgram {
            instructions: emitter.finish(),
            stats: state.stats,
        }
    }

    /// Emits one layer and records its start point for the next one.
    pub fn process_layer(&self, state: &mut RunState, emitter: &mut GcodeEmitter, layer: &Layer) {
        state.continuity.begin_layer();
        let reference = state.continuity.reference_for_layer(&self.params.reference);
        let ordered = state.continuity.order_contours(&layer.contours);

        debug!(
            "Layer Z={:.3}: {} contours, reference {}",
            layer.z,
            layer.contours.len(),
            reference
        );
        emitter.begin_layer(layer.z);
        state.stats.layers_emitted += 1;

        for (index, contour) in ordered.into_iter().enumerate() {
            let prepared = self.prepare_loop(contour, &reference);
            let emitted = match &prepared {
                Some(prepared) => emitter.emit_loop(layer.z, &prepared.path, &mut state.deposition),
                None => false,
            };

            let Some(prepared) = prepared.filter(|_| emitted) else {
                trace!("Loop {} at Z={:.3} too short, skipped", index, layer.z);
                state.stats.loops_skipped += 1;
                continue;
            };

            let deposited = state.deposition.loop_total();
            trace!(
                "Loop {} at Z={:.3}: {} points from {}, deposited {:.5}",
                index,
                layer.z,
                prepared.path.len(),
                prepared.pivot,
                deposited
            );
            state.stats.loops_emitted += 1;
            state.stats.path_length += prepared.path.length();
            state.stats.max_loop_deposition = state.stats.max_loop_deposition.max(deposited);
            state.continuity.record(&prepared.pivot);
        }
    }

    /// Rotation, trimming and decimation of one contour.
    ///
    /// `None` for an empty contour.
    pub fn prepare_loop(&self, contour: &Contour, reference: &Point) -> Option<PreparedLoop> {
        let (rotated, pivot) = rotate_to_nearest(contour, reference)?;
        let trimmed = trim_tail(&rotated, self.params.trim_distance);
        let path = decimate(&trimmed, self.params.min_spacing);
        Some(PreparedLoop { path, pivot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deposition::DepositionSettings;

    fn square(x: f64, y: f64, size: f64) -> Contour {
        Contour::from_points(vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ])
    }

    fn params() -> ToolpathParameters {
        ToolpathParameters {
            trim_distance: 5.0,
            min_spacing: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_prepare_loop_runs_all_stages() {
        let generator = ToolpathGenerator::new(params());
        let prepared = generator
            .prepare_loop(&square(0.0, 0.0, 10.0), &Point::new(0.0, 0.0))
            .unwrap();
        assert_eq!(prepared.pivot, Point::new(0.0, 0.0));
        assert_eq!(prepared.path.last(), Some(&Point::new(0.0, 5.0)));
        assert!((prepared.path.length() - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_prepare_empty_contour() {
        let generator = ToolpathGenerator::new(params());
        assert!(generator
            .prepare_loop(&Contour::default(), &Point::new(0.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_missing_sections_skipped() {
        let generator = ToolpathGenerator::new(params());
        let slicer = |z: f64| (z < 50.0).then(|| vec![square(0.0, 0.0, 10.0)]);
        let program = generator.generate_at(&slicer, &[30.0, 60.0]);

        assert_eq!(program.stats.layers_emitted, 1);
        assert_eq!(program.stats.layers_skipped, 1);
        assert!(!program.to_gcode().contains("Z = 60.0"));
    }

    #[test]
    fn test_empty_section_emits_layer_only() {
        let generator = ToolpathGenerator::new(params());
        let slicer = |_z: f64| Some(Vec::<Contour>::new());
        let program = generator.generate_at(&slicer, &[30.0]);
        let lines = program.lines();

        let at = lines
            .iter()
            .position(|l| l == "; ---------- Z = 30.0 mm ----------")
            .unwrap();
        assert_eq!(lines[at + 1], "G01 Z30.000");
        assert_eq!(lines[at + 2], "G01 F2000");
        assert_eq!(program.stats.loops_emitted, 0);
    }

    #[test]
    fn test_degenerate_loop_counted_as_skipped() {
        let generator = ToolpathGenerator::new(params());
        let tiny = Contour::from_points(vec![Point::new(3.0, 3.0)]);
        let slicer = move |_z: f64| Some(vec![tiny.clone(), square(0.0, 0.0, 10.0)]);
        let program = generator.generate_at(&slicer, &[30.0]);
        assert_eq!(program.stats.loops_skipped, 1);
        assert_eq!(program.stats.loops_emitted, 1);
    }

    #[test]
    fn test_largest_loop_deposition() {
        let generator = ToolpathGenerator::new(ToolpathParameters {
            deposition: DepositionSettings {
                enabled: true,
                rate: 0.1,
                ..Default::default()
            },
            ..params()
        });
        let slicer = |_z: f64| Some(vec![square(0.0, 0.0, 5.0), square(20.0, 0.0, 10.0)]);
        let program = generator.generate_at(&slicer, &[30.0, 60.0]);

        // trimmed lengths 15 and 35
        assert!((program.stats.max_loop_deposition - 3.5).abs() < 1e-9);
        assert!((program.stats.deposition_total - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_loop_deposition_when_disabled() {
        let generator = ToolpathGenerator::new(params());
        let slicer = |_z: f64| Some(vec![square(0.0, 0.0, 10.0)]);
        let program = generator.generate_at(&slicer, &[30.0]);
        assert_eq!(program.stats.max_loop_deposition, 0.0);
    }

    #[test]
    fn test_continuity_records_first_emitted_loop() {
        let generator = ToolpathGenerator::new(ToolpathParameters {
            auto_start: true,
            ..params()
        });
        let mut state = RunState::new(generator.params());
        let mut emitter = GcodeEmitter::new(generator.params());
        emitter.header();

        let layer = Layer {
            z: 30.0,
            contours: vec![
                Contour::from_points(vec![Point::new(1.0, 1.0)]),
                square(20.0, 20.0, 10.0),
                square(0.0, 0.0, 5.0),
            ],
        };
        generator.process_layer(&mut state, &mut emitter, &layer);
        assert_eq!(state.continuity.last_start(), Some(Point::new(20.0, 20.0)));
    }

    #[test]
    fn test_run_state_is_fresh_per_run() {
        let generator = ToolpathGenerator::new(ToolpathParameters {
            auto_start: true,
            ..params()
        });
        let slicer = |_z: f64| Some(vec![square(0.0, 0.0, 10.0)]);
        let first = generator.generate_at(&slicer, &[30.0, 60.0]);
        let second = generator.generate_at(&slicer, &[30.0, 60.0]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_program_text() {
        let generator = ToolpathGenerator::new(params());
        let slicer = |_z: f64| Some(vec![square(0.0, 0.0, 10.0)]);
        let program = generator.generate(&slicer, 30.0);

        let text = program.to_gcode();
        assert!(text.starts_with("; *** Generated by layerpath ***\n"));
        assert!(text.ends_with("G01 F2000"));
        assert!(!text.ends_with('\n'));

        let mut buffer = Vec::new();
        program.write_to(&mut buffer).unwrap();
        assert_eq!(buffer, text.as_bytes());
    }
}
