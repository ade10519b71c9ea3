use clap::Parser;
use layerpath::{init_logging, run, Cli, BUILD_DATE, VERSION};
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;
    debug!("layerpath {} built {}", VERSION, BUILD_DATE);

    let stats = run(&cli)?;
    info!(
        "Layers: {} emitted, {} skipped. Loops: {} emitted, {} skipped.",
        stats.layers_emitted, stats.layers_skipped, stats.loops_emitted, stats.loops_skipped
    );
    info!(
        "Path length {:.3} mm, deposition total {:.5}, largest loop {:.5}",
        stats.path_length, stats.deposition_total, stats.max_loop_deposition
    );

    Ok(())
}
