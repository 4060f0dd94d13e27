//! render-config cli interface

use clap::{Parser, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render homelab config into inventory, tfvars, and platform-core values",
    long_about = None
)]
pub struct Cli {
    /// Path to homelab config YAML
    ///
    /// Relative paths are resolved against the repository root.
    #[clap(long = "config", default_value = homelab_render::config_document::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Repository root
    ///
    /// All outputs are written below this directory. Defaults to the work directory.
    #[clap(short = 'C', long = "repo-root")]
    pub repo_root: Option<PathBuf>,

    #[arg(short = 'F', long = "report-format", default_value_t)]
    pub report_format: ReportFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => f.write_str("text"),
            ReportFormat::Json => f.write_str("json"),
            ReportFormat::Yaml => f.write_str("yaml"),
        }
    }
}
