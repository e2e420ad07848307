//! Serializes feature vectors in the selected [`OutputFormat`].

use super::OutputFormat;
use crate::error::ProcessError;
use crate::features::{FeatureVector, ATTRIBUTES};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const SEPARATOR: &str = ",";

pub struct FlowWriter<W: Write> {
    inner: W,
    format: OutputFormat,
    relation: String,
}

impl<W: Write> FlowWriter<W> {
    pub fn new(inner: W, format: OutputFormat, relation: impl Into<String>) -> Self {
        Self {
            inner,
            format,
            relation: relation.into(),
        }
    }

    /// Header (ARFF only) followed by one line per flow.
    pub fn write_all(&mut self, vectors: &[FeatureVector]) -> std::io::Result<()> {
        if self.format == OutputFormat::Arff {
            self.write_arff_header()?;
        }
        for fv in vectors {
            self.write_one(fv)?;
        }
        Ok(())
    }

    fn write_one(&mut self, fv: &FeatureVector) -> std::io::Result<()> {
        let line = match self.format {
            OutputFormat::Csv | OutputFormat::Arff => fv.to_row(SEPARATOR),
            OutputFormat::JsonLines => serde_json::to_string(&fv.to_json_object())?,
        };
        writeln!(self.inner, "{}", line)
    }

    fn write_arff_header(&mut self) -> std::io::Result<()> {
        writeln!(self.inner, "@RELATION {}", self.relation)?;
        for attr in ATTRIBUTES.iter() {
            writeln!(self.inner, "@ATTRIBUTE {} {}", attr.name, attr.kind)?;
        }
        writeln!(self.inner, "@DATA")
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Create (or truncate) `path` and write every vector to it.
pub fn write_flows(
    path: &Path,
    format: OutputFormat,
    relation: &str,
    vectors: &[FeatureVector],
) -> Result<(), ProcessError> {
    let file = File::create(path).map_err(|e| ProcessError::io(path, e))?;
    let mut writer = FlowWriter::new(BufWriter::new(file), format, relation);
    writer
        .write_all(vectors)
        .and_then(|_| writer.into_inner().flush())
        .map_err(|e| ProcessError::io(path, e))?;
    info!(path = %path.display(), %format, flows = vectors.len(), "wrote flows");
    Ok(())
}
