use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

/// Converts sliced contour loops into a layer-by-layer G-code toolpath
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Contour sections as JSON
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,
    /// Configuration file (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// G-code destination, stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}
