//! Delimited-text reader for packet records.

use super::MIN_FIELDS;
use crate::error::ProcessError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// One packet record with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    pub records: Vec<Record>,
    /// Lines dropped for having fewer than [`MIN_FIELDS`] fields.
    pub skipped: usize,
}

pub struct RecordReader {
    separator: String,
}

impl RecordReader {
    pub fn new(separator: impl Into<String>) -> Self {
        let separator = separator.into();
        Self {
            separator: if separator.is_empty() {
                ",".to_string()
            } else {
                separator
            },
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn read_path(&self, path: &Path) -> Result<RecordBatch, ProcessError> {
        let file = File::open(path).map_err(|e| ProcessError::io(path, e))?;
        let batch = self
            .read(BufReader::new(file))
            .map_err(|e| ProcessError::io(path, e))?;
        debug!(
            path = %path.display(),
            records = batch.records.len(),
            skipped = batch.skipped,
            "read packet records"
        );
        Ok(batch)
    }

    pub fn read<R: BufRead>(&self, reader: R) -> Result<RecordBatch, std::io::Error> {
        let mut batch = RecordBatch::default();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let fields = self.split(&line);
            if fields.len() < MIN_FIELDS {
                trace!(line = i + 1, fields = fields.len(), "skipping short record");
                batch.skipped += 1;
                continue;
            }
            batch.records.push(Record {
                line: i + 1,
                fields,
            });
        }
        Ok(batch)
    }

    /// Split on the separator; trailing empty columns do not count toward the field total.
    pub fn split(&self, line: &str) -> Vec<String> {
        let mut fields: Vec<String> = line
            .split(self.separator.as_str())
            .map(str::to_string)
            .collect();
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        fields
    }
}

impl Default for RecordReader {
    fn default() -> Self {
        Self::new(",")
    }
}
