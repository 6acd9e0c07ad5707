//! CLI commands

pub mod kv;
pub mod template;

use clap::Args;
use kvplate_core::Format;
use std::path::PathBuf;

use crate::error::{CliError, Result};

/// Options shared by `kv` and `template`
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Input files (reads stdin when none are given)
    pub files: Vec<PathBuf>,

    /// Input format: toml, json, yaml, yml, hcl, prop, props, properties
    #[arg(short = 'f', long, default_value = "json", env = "KVPLATE_FORMAT")]
    pub format: String,

    /// Key prefix prepended to every generated key
    #[arg(short = 'p', long, default_value = "", env = "KVPLATE_PREFIX")]
    pub prefix: String,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl ConvertArgs {
    /// Resolve `--format`, rejecting unsupported names before any input is read
    pub fn input_format(&self) -> Result<Format> {
        Format::from_name(&self.format).ok_or_else(|| CliError::unsupported_format(&self.format))
    }
}

/// Name used in errors that span every input
fn describe_sources(args: &ConvertArgs) -> String {
    if args.files.is_empty() {
        "<stdin>".to_string()
    } else {
        args.files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
