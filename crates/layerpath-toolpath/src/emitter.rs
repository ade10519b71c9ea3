//! G-code emission
//!
//! [`GcodeEmitter`] appends instructions in program order: one header, any
//! number of layers each holding any number of loops, then one footer.

use crate::deposition::{DepositionAccumulator, DepositionMode};
use crate::gcode::Instruction;
use crate::params::ToolpathParameters;
use layerpath_core::{Point, Polyline};

/// Position of the emitter within the program
///
/// `Ready -> Header -> (LayerStart -> (LoopStart -> LoopBody)*)* -> Footer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    Ready,
    Header,
    LayerStart,
    /// Travel move to the loop's first point emitted
    LoopStart,
    LoopBody,
    Footer,
}

/// Builds the instruction list for one program
#[derive(Debug, Clone)]
pub struct GcodeEmitter {
    params: ToolpathParameters,
    state: EmitterState,
    instructions: Vec<Instruction>,
}

impl GcodeEmitter {
    pub fn new(params: &ToolpathParameters) -> Self {
        Self {
            params: params.clone(),
            state: EmitterState::Ready,
            instructions: Vec::new(),
        }
    }

    pub fn state(&self) -> EmitterState {
        self.state
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Generator banner, parameter comments, unit and positioning preamble,
    /// and the deposition mode select when deposition is enabled.
    pub fn header(&mut self) {
        debug_assert_eq!(self.state, EmitterState::Ready, "header emitted twice");

        let params = &self.params;
        let mut lines = vec![
            Instruction::comment("*** Generated by layerpath ***"),
            Instruction::comment(format!("Layer height: {:.3} mm", params.layer_height)),
            Instruction::comment(format!("Feed rate: {} mm/min", params.feed_rate)),
            Instruction::comment(format!("Trim distance: {:.3} mm", params.trim_distance)),
            Instruction::comment(format!("Minimum spacing: {:.3} mm", params.min_spacing)),
        ];

        let deposition = &params.deposition;
        if deposition.enabled {
            lines.push(Instruction::comment(format!(
                "Deposition: {}, {:.5} per mm",
                deposition.mode, deposition.rate
            )));
        } else {
            lines.push(Instruction::comment("Deposition: off"));
        }

        lines.push(Instruction::Millimeters);
        lines.push(Instruction::AbsolutePositioning);
        if deposition.enabled {
            match deposition.mode {
                DepositionMode::Cumulative => {
                    lines.push(Instruction::AbsoluteDeposition);
                    lines.push(Instruction::ResetDepositionAxis);
                }
                DepositionMode::PerSegment => lines.push(Instruction::RelativeDeposition),
            }
        }

        self.instructions.extend(lines);
        self.state = EmitterState::Header;
    }

    /// Layer boundary comment followed by the height change.
    pub fn begin_layer(&mut self, z: f64) {
        debug_assert!(
            matches!(
                self.state,
                EmitterState::Header | EmitterState::LayerStart | EmitterState::LoopBody
            ),
            "layer started in state {:?}",
            self.state
        );

        self.instructions.push(Instruction::Blank);
        self.instructions
            .push(Instruction::comment(format!("---------- Z = {:.1} mm ----------", z)));
        self.instructions.push(Instruction::move_z(z));
        self.state = EmitterState::LayerStart;
    }

    /// Emits one finished loop at height `z`.
    ///
    /// The loop opens with a feed-rate line and a travel move to its first
    /// point, then one linear move per segment. Returns `false` without
    /// emitting anything when the path has fewer than two points.
    pub fn emit_loop(
        &mut self,
        z: f64,
        path: &Polyline,
        deposition: &mut DepositionAccumulator,
    ) -> bool {
        debug_assert!(
            matches!(
                self.state,
                EmitterState::LayerStart | EmitterState::LoopBody
            ),
            "loop emitted in state {:?}",
            self.state
        );

        let Some(start) = path.first().filter(|_| path.is_valid()) else {
            return false;
        };

        self.open_loop(z, start, deposition);
        self.loop_body(path, deposition);
        true
    }

    fn open_loop(&mut self, z: f64, start: &Point, deposition: &mut DepositionAccumulator) {
        self.instructions
            .push(Instruction::Feedrate(self.params.feed_rate));
        let start_value = deposition.begin_loop();
        self.instructions
            .push(Instruction::move_to(start, Some(z), start_value));
        self.state = EmitterState::LoopStart;
    }

    fn loop_body(&mut self, path: &Polyline, deposition: &mut DepositionAccumulator) {
        debug_assert_eq!(self.state, EmitterState::LoopStart, "loop body without travel");

        for (from, to) in path.segments() {
            let value = deposition.segment(from, to);
            self.instructions.push(Instruction::move_to(to, None, value));
        }

        if deposition.resets_at_loop_end() {
            self.instructions.push(Instruction::DepositionOff);
        }

        self.state = EmitterState::LoopBody;
    }

    /// Deposition axis reset in cumulative mode, feed-rate reset and the
    /// optional program end.
    pub fn footer(&mut self) {
        debug_assert!(
            !matches!(
                self.state,
                EmitterState::Ready | EmitterState::LoopStart | EmitterState::Footer
            ),
            "footer emitted in state {:?}",
            self.state
        );

        let deposition = &self.params.deposition;
        if deposition.enabled && deposition.mode == DepositionMode::Cumulative {
            self.instructions.push(Instruction::ResetDepositionAxis);
        }
        self.instructions
            .push(Instruction::Feedrate(self.params.feed_rate));
        if self.params.program_end {
            self.instructions.push(Instruction::ProgramEnd);
        }
        self.state = EmitterState::Footer;
    }

    pub fn finish(self) -> Vec<Instruction> {
        self.instructions
    }
}
