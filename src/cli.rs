//! Command-line flags; they override values loaded from the config file.

use crate::config::{ProcessorConfig, CONFIG_ENV};
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Separator of the input file [default: ,]
    #[clap(short, long)]
    pub separator: Option<String>,

    /// Input file of packet records [default: dataoutput.csv]
    #[clap(short, long)]
    pub input: Option<PathBuf>,

    /// Output file [default: processed.csv]
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Write an ARFF document instead of plain CSV
    #[clap(short, long)]
    pub arff: bool,

    /// Output format: csv, arff or jsonl
    #[clap(short, long)]
    pub format: Option<OutputFormat>,

    /// ARFF relation name [default: processed]
    #[clap(short, long)]
    pub relation: Option<String>,

    /// JSON config file (falls back to $FLOW_FEATURES_CONFIG, then config.json)
    #[clap(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    /// Flags take precedence over the config file.
    pub fn apply(&self, config: &mut ProcessorConfig) {
        if let Some(ref s) = self.separator {
            config.input.separator = s.clone();
        }
        if let Some(ref p) = self.input {
            config.input.path = p.clone();
        }
        if let Some(ref p) = self.output {
            config.output.path = p.clone();
        }
        if let Some(f) = self.format {
            config.output.format = f;
        }
        if self.arff {
            config.output.format = OutputFormat::Arff;
        }
        if let Some(ref r) = self.relation {
            config.output.relation = r.clone();
        }
    }
}
