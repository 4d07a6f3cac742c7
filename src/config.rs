use crate::catalog::category;
use crate::error::{KurmiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory the parser always writes into, relative to the working directory.
pub const EXTRACTION_DIR: &str = "kurmi_workspace_extraction";

pub const DEFAULT_CONFIG_FILES: &[&str] = &["kurmi.toml", ".kurmi.toml"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    pub archive_suffix: String,
    pub search_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    pub reserved_categories: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub parser_log: String,
    pub filter_log: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            archive_suffix: ".configfile.zip".to_string(),
            search_dirs: vec![PathBuf::from("."), PathBuf::from("workspaceExport")],
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            reserved_categories: vec!["scenarios".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            parser_log: "workspace_parser.log".to_string(),
            filter_log: "vendor_filter.log".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(KurmiError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| KurmiError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| KurmiError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    /// Loads `config_path` if given, otherwise the first default config file
    /// found in `working_dir`, otherwise the built-in defaults.
    pub fn load_with_defaults<P: AsRef<Path>>(
        config_path: Option<P>,
        working_dir: &Path,
    ) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in DEFAULT_CONFIG_FILES {
                    let candidate = working_dir.join(default_path);
                    if candidate.exists() {
                        return Self::load_from_file(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref suffix) = cli_args.archive_suffix {
            self.discovery.archive_suffix = suffix.clone();
        }

        if let Some(ref reserved) = cli_args.reserved_categories {
            self.filter.reserved_categories = reserved.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| KurmiError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| KurmiError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.discovery.archive_suffix.trim().is_empty() {
            return Err(KurmiError::Config {
                message: "Archive suffix must not be empty".to_string(),
            });
        }

        if self.discovery.search_dirs.is_empty() {
            return Err(KurmiError::Config {
                message: "At least one archive search directory must be specified".to_string(),
            });
        }

        for reserved in &self.filter.reserved_categories {
            if category::find(reserved).is_none() {
                return Err(KurmiError::Config {
                    message: format!(
                        "Unknown reserved category '{}' (expected one of: {})",
                        reserved,
                        category::names().join(", ")
                    ),
                });
            }
        }

        if self.logging.parser_log.trim().is_empty() || self.logging.filter_log.trim().is_empty()
        {
            return Err(KurmiError::Config {
                message: "Log file names must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Category directory names the vendor filter scans and prunes.
    pub fn scanned_categories(&self) -> Vec<String> {
        category::CATEGORIES
            .iter()
            .map(|c| c.name)
            .filter(|name| !self.filter.reserved_categories.iter().any(|r| r == name))
            .map(str::to_string)
            .collect()
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub archive_suffix: Option<String>,
    pub reserved_categories: Option<Vec<String>>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_archive_suffix(mut self, suffix: Option<String>) -> Self {
        self.archive_suffix = suffix;
        self
    }

    pub fn with_reserved_categories(mut self, reserved: Option<Vec<String>>) -> Self {
        self.reserved_categories = reserved;
        self
    }
}
