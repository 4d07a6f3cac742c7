pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod pruner;
pub mod selection;
pub mod ui;

// Public API re-exports
pub use cli::{CommonArgs, FilterCli, OutputFormat, ParserCli};
pub use config::{CliOverrides, Config, DiscoveryConfig, FilterConfig, LoggingConfig};
pub use error::{KurmiError, Result, UserFriendlyError};

// Core functionality re-exports
pub use catalog::{
    find_workspace_archives, ArchiveCandidate, Category, CategoryClassifier, RemovalPlan,
    VendorCatalog, VendorScanner, CATEGORIES,
};
pub use commands::{FilterOutcome, VendorFilter, WorkspaceParser};
pub use extractor::{ArchiveExtractor, ExtractionProgress, ExtractionReport};
pub use pruner::{PruneReport, VendorPruner};
pub use selection::{Command, Preset, SelectionSession, Transition, VENDOR_PRESETS};
pub use ui::{MenuIo, MenuOutcome, OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Write a sample configuration file
pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let sample_config = Config::create_sample_config();
    std::fs::write(output_path.as_ref(), sample_config)?;
    Ok(())
}
