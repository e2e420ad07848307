//! Feature extraction pipeline: records → flow table → one vector per flow.

use super::FeatureVector;
use crate::error::{ProcessError, RecordError};
use crate::flow::FlowTable;
use crate::records::RecordBatch;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// Counters for one run, logged when the extractor is flushed.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub records: usize,
    /// Lines the reader dropped as too short.
    pub skipped: usize,
    /// Records addressed to an already closed flow.
    pub rejected: usize,
    pub flows: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub struct FeatureExtractor {
    table: FlowTable,
    records: usize,
    skipped: usize,
    rejected: usize,
    started_at: DateTime<Utc>,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            table: FlowTable::new(),
            records: 0,
            skipped: 0,
            rejected: 0,
            started_at: Utc::now(),
        }
    }

    /// Fold one raw record into its flow. `Ok(false)` if the flow was closed.
    pub fn push<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<bool, RecordError> {
        let accepted = self.table.ingest_record(fields)?;
        self.records += 1;
        if !accepted {
            self.rejected += 1;
        }
        Ok(accepted)
    }

    /// Fold a whole batch in order; the first malformed record aborts.
    pub fn push_batch(&mut self, batch: &RecordBatch) -> Result<(), ProcessError> {
        self.skipped += batch.skipped;
        for record in &batch.records {
            self.push(&record.fields)
                .map_err(|source| ProcessError::Record {
                    line: record.line,
                    source,
                })?;
        }
        Ok(())
    }

    pub fn table(&self) -> &FlowTable {
        &self.table
    }

    /// Finalize every flow, in creation order.
    pub fn flush(self) -> (Vec<FeatureVector>, RunSummary) {
        for flow in self.table.iter() {
            debug!(
                flow = %flow.key(),
                avg_up_size = flow.avg_uplink_packet_size(),
                max_up_size = flow.max_uplink_packet_size(),
                state = ?flow.state(),
                "flow finalized"
            );
        }
        let vectors = self.table.feature_vectors();
        let summary = RunSummary {
            records: self.records,
            skipped: self.skipped,
            rejected: self.rejected,
            flows: vectors.len(),
            started_at: self.started_at,
            finished_at: Utc::now(),
        };
        info!(
            records = summary.records,
            skipped = summary.skipped,
            rejected = summary.rejected,
            flows = summary.flows,
            "flows extracted"
        );
        (vectors, summary)
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
