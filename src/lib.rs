//! # layerpath
//!
//! Converts per-height contour loops of a sliced solid into a continuous,
//! deposition-aware G-code toolpath.
//!
//! ## Architecture
//!
//! layerpath is organized as a workspace with multiple crates:
//!
//! 1. **layerpath-core** - Points, contour rings, polylines, geometry
//! 2. **layerpath-toolpath** - Loop normalization, continuity, deposition, emission
//! 3. **layerpath-settings** - Configuration files and validation
//! 4. **layerpath** - Command-line adapter that integrates all crates

pub mod cli;

use anyhow::Context;
use layerpath_settings::Config;
use layerpath_toolpath::{ContourSet, ToolpathGenerator, ToolpathProgram};
use std::fs::File;
use std::io::{self, BufWriter};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

pub use cli::Cli;
pub use layerpath_core::{Contour, Point, Polyline};
pub use layerpath_toolpath::ProgramStats;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout free for G-code
/// - `level` as the default, overridable through RUST_LOG
pub fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

/// Generates the program for `contours` under `config`.
///
/// The model height comes from `slicing.z_max` when set, otherwise from the
/// contour set.
pub fn convert(contours: &ContourSet, config: &Config) -> anyhow::Result<ToolpathProgram> {
    let z_max = config
        .slicing
        .z_max
        .or_else(|| contours.model_height())
        .context("Model height unknown: contour file has no sections and no slicing.z_max")?;

    let generator = ToolpathGenerator::new(config.to_parameters());
    Ok(generator.generate(contours, z_max))
}

/// Runs one conversion as described by the command line.
pub fn run(cli: &Cli) -> anyhow::Result<ProgramStats> {
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let contours = ContourSet::load_from_file(&cli.input)
        .with_context(|| format!("Failed to read contours {}", cli.input.display()))?;
    info!(
        "Read {} sections from {}",
        contours.layers.len(),
        cli.input.display()
    );

    let program = convert(&contours, &config)?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            program
                .write_to(&mut BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("G-code written to {}", path.display());
        }
        None => {
            program
                .write_to(&mut io::stdout().lock())
                .context("Failed to write G-code to stdout")?;
        }
    }

    Ok(program.stats)
}
