//! Output instruction vocabulary.
//!
//! Coordinates are written with three decimals and deposition values with
//! five, across the whole program.

use layerpath_core::Point;
use std::fmt;

/// One line of the output program
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Empty separator line
    Blank,
    /// `; text`
    Comment(String),
    /// `G21`
    Millimeters,
    /// `G90`
    AbsolutePositioning,
    /// `M82`
    AbsoluteDeposition,
    /// `M83`
    RelativeDeposition,
    /// `G92 E0`
    ResetDepositionAxis,
    /// `G01 F<feed>`
    Feedrate(u32),
    /// `G01` with any of X, Y, Z and E
    Linear {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        e: Option<f64>,
    },
    /// `G01 E0`
    DepositionOff,
    /// `M30`
    ProgramEnd,
}

impl Instruction {
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    /// Height change with no planar motion.
    pub fn move_z(z: f64) -> Self {
        Self::Linear {
            x: None,
            y: None,
            z: Some(z),
            e: None,
        }
    }

    /// Planar move to `to`, optionally at height `z`.
    pub fn move_to(to: &Point, z: Option<f64>, e: Option<f64>) -> Self {
        Self::Linear {
            x: Some(to.x),
            y: Some(to.y),
            z,
            e,
        }
    }

    /// Whether the line carries a deposition field.
    pub fn has_deposition(&self) -> bool {
        matches!(
            self,
            Self::Linear { e: Some(_), .. } | Self::DepositionOff | Self::ResetDepositionAxis
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Comment(text) => write!(f, "; {}", text),
            Self::Millimeters => write!(f, "G21"),
            Self::AbsolutePositioning => write!(f, "G90"),
            Self::AbsoluteDeposition => write!(f, "M82"),
            Self::RelativeDeposition => write!(f, "M83"),
            Self::ResetDepositionAxis => write!(f, "G92 E0"),
            Self::Feedrate(feed) => write!(f, "G01 F{}", feed),
            Self::Linear { x, y, z, e } => {
                write!(f, "G01")?;
                if let Some(x) = x {
                    write!(f, " X{:.3}", x)?;
                }
                if let Some(y) = y {
                    write!(f, " Y{:.3}", y)?;
                }
                if let Some(z) = z {
                    write!(f, " Z{:.3}", z)?;
                }
                if let Some(e) = e {
                    write!(f, " E{:.5}", e)?;
                }
                Ok(())
            }
            Self::DepositionOff => write!(f, "G01 E0"),
            Self::ProgramEnd => write!(f, "M30"),
        }
    }
}
