//! flow-features entrypoint: one batch run from a packet-record file to a flow dataset.

use clap::Parser;
use flow_features::{cli::Args, config::ProcessorConfig, logging::StructuredLogger};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let mut config = ProcessorConfig::load(&args.config_path());
    args.apply(&mut config);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(
        input = %config.input.path.display(),
        output = %config.output.path.display(),
        format = %config.output.format,
        "flow-features starting"
    );

    let summary = flow_features::run(&config)?;

    info!(
        flows = summary.flows,
        elapsed_ms = (summary.finished_at - summary.started_at).num_milliseconds(),
        "flow-features done"
    );
    Ok(())
}
