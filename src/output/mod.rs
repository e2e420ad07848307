//! Output of flow feature vectors as CSV rows, an ARFF document, or JSON lines.

mod writer;

pub use writer::{write_flows, FlowWriter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Arff,
    #[serde(rename = "jsonl", alias = "jsonlines")]
    JsonLines, // One JSON object per flow
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "arff" => Ok(Self::Arff),
            "jsonl" | "jsonlines" => Ok(Self::JsonLines),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Arff => write!(f, "arff"),
            Self::JsonLines => write!(f, "jsonl"),
        }
    }
}
