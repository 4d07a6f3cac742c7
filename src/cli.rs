use crate::config::{CliOverrides, Config, EXTRACTION_DIR};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Args, Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "kurmi-workspace-parser")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract a Kurmi workspace export into per-category directories")]
#[command(
    long_about = "Reads a Kurmi workspace export (*.configfile.zip), classifies every member \
                  by file name suffix and copies it into kurmi_workspace_extraction/<category>/, \
                  keeping the vendor directory structure of the archive."
)]
#[command(after_help = "EXAMPLES:\n  \
    kurmi-workspace-parser\n  \
    kurmi-workspace-parser --input workspaceExport/prod.configfile.zip\n  \
    kurmi-workspace-parser --output-format json --quiet")]
pub struct ParserCli {
    /// Workspace archive to extract (auto-detected when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// File name suffix used when searching for archives
    #[arg(long, help = "Archive suffix to search for (default .configfile.zip)")]
    pub archive_suffix: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(name = "kurmi-vendor-filter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactively remove vendor directories from an extracted Kurmi workspace")]
#[command(
    long_about = "Scans the vendor directories of an extraction produced by \
                  kurmi-workspace-parser, lets you choose which vendors to keep, and deletes \
                  every other vendor directory after confirmation."
)]
#[command(after_help = "EXAMPLES:\n  \
    kurmi-vendor-filter\n  \
    kurmi-vendor-filter --directory old_extraction\n  \
    kurmi-vendor-filter --reserved scenarios,emails")]
pub struct FilterCli {
    /// Extraction root to filter
    #[arg(short, long, default_value = EXTRACTION_DIR)]
    pub directory: PathBuf,

    /// Categories that are never scanned or pruned
    #[arg(long, value_delimiter = ',')]
    pub reserved: Option<Vec<String>>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl CommonArgs {
    pub fn output_mode(&self) -> OutputMode {
        self.output_format.into()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    fn load_config(&self, working_dir: &Path, overrides: &CliOverrides) -> Result<Config> {
        let config_path = self.config.as_ref().map(|p| working_dir.join(p));
        let mut config = Config::load_with_defaults(config_path, working_dir)?;

        config.merge_with_cli_args(overrides);
        config.validate()?;

        Ok(config)
    }
}

impl ParserCli {
    pub fn load_config(&self, working_dir: &Path) -> Result<Config> {
        self.common.load_config(working_dir, &self.create_cli_overrides())
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new().with_archive_suffix(self.archive_suffix.clone())
    }
}

impl FilterCli {
    pub fn load_config(&self, working_dir: &Path) -> Result<Config> {
        self.common.load_config(working_dir, &self.create_cli_overrides())
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new().with_reserved_categories(self.reserved.clone())
    }
}
