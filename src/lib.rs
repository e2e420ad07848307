//! flow-features — turns per-packet records into bidirectional flow feature vectors.
//!
//! Modular structure:
//! - [`records`] — Packet record layout, field parsing, delimited-text reader
//! - [`flow`] — Flow identity, per-flow running statistics, flow table
//! - [`features`] — Feature vector schema and the extraction pipeline
//! - [`output`] — CSV / ARFF / JSON-lines writer
//! - [`logging`] — Structured logging

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod flow;
pub mod logging;
pub mod output;
pub mod records;

pub use config::ProcessorConfig;
pub use error::{ProcessError, RecordError};
pub use features::{FeatureExtractor, FeatureValue, FeatureVector, RunSummary};
pub use flow::{Direction, FlowAggregator, FlowKey, FlowState, FlowTable};
pub use logging::StructuredLogger;
pub use output::OutputFormat;
pub use records::RecordReader;

/// Read the configured input, aggregate every flow, and write the result.
pub fn run(config: &ProcessorConfig) -> Result<RunSummary, ProcessError> {
    let reader = RecordReader::new(config.input.separator.clone());
    let batch = reader.read_path(&config.input.path)?;

    let mut extractor = FeatureExtractor::new();
    extractor.push_batch(&batch)?;
    let (vectors, summary) = extractor.flush();

    output::write_flows(
        &config.output.path,
        config.output.format,
        &config.output.relation,
        &vectors,
    )?;
    Ok(summary)
}
