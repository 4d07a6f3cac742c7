use thiserror::Error;

#[derive(Error, Debug)]
pub enum KurmiError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read archive {path}: {message}")]
    Archive { path: String, message: String },

    #[error("Workspace archive not found: {path}")]
    ArchiveNotFound { path: String },

    #[error("No workspace archives found")]
    NoArchivesFound { searched: Vec<String> },

    #[error("Extraction directory not found: {path}")]
    ExtractionDirNotFound { path: String },

    #[error("No categories selected")]
    NoCategoriesSelected,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for KurmiError {
    fn user_message(&self) -> String {
        match self {
            KurmiError::Archive { path, message } => {
                format!("Could not read workspace archive {}: {}", path, message)
            }
            KurmiError::ArchiveNotFound { path } => {
                format!("Workspace archive not found: {}", path)
            }
            KurmiError::NoArchivesFound { searched } => {
                format!("No workspace archives found in: {}", searched.join(", "))
            }
            KurmiError::ExtractionDirNotFound { path } => {
                format!("Extraction directory not found: {}", path)
            }
            KurmiError::NoCategoriesSelected => {
                "No categories selected, nothing to extract".to_string()
            }
            KurmiError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            KurmiError::Cancelled => "Operation was cancelled by user".to_string(),
            KurmiError::Io(_) => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            KurmiError::Archive { .. } => Some(
                "Make sure the file is a complete Kurmi workspace export (*.configfile.zip) and try exporting it again.".to_string()
            ),
            KurmiError::ArchiveNotFound { .. } => Some(
                "Check the path passed to --input, or omit it to pick from the archives found in the current directory.".to_string()
            ),
            KurmiError::NoArchivesFound { .. } => Some(
                "Place Kurmi workspace export files (*.configfile.zip) in the current directory or in workspaceExport/, or pass one with --input.".to_string()
            ),
            KurmiError::ExtractionDirNotFound { .. } => Some(
                "Run kurmi-workspace-parser first to extract the workspace, or point --directory at an existing extraction.".to_string()
            ),
            KurmiError::NoCategoriesSelected => Some(
                "Select at least one category in the menu (type 'all' to select every category).".to_string()
            ),
            KurmiError::Config { .. } => Some(
                "Check your configuration file syntax, or run with --generate-config to write a fresh sample.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for KurmiError {
    fn from(error: toml::de::Error) -> Self {
        KurmiError::Config {
            message: error.to_string(),
        }
    }
}

impl KurmiError {
    pub fn archive<P: AsRef<std::path::Path>>(path: P, error: zip::result::ZipError) -> Self {
        KurmiError::Archive {
            path: path.as_ref().display().to_string(),
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KurmiError>;

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
