use crate::config::DiscoveryConfig;
use crate::error::{KurmiError, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ArchiveCandidate {
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

impl ArchiveCandidate {
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let metadata = std::fs::metadata(&path)?;

        Ok(Self {
            path,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }

    pub fn modified_display(&self) -> String {
        let local: chrono::DateTime<chrono::Local> = self.modified.into();
        local.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Finds workspace archives under `base`, newest first.
pub fn find_workspace_archives(
    base: &Path,
    config: &DiscoveryConfig,
) -> Result<Vec<ArchiveCandidate>> {
    let mut candidates = Vec::new();

    for dir in &config.search_dirs {
        let search_dir = base.join(dir);
        if !search_dir.is_dir() {
            debug!("Archive search directory {} not present", search_dir.display());
            continue;
        }

        let pattern = format!(
            "{}/*{}",
            glob::Pattern::escape(&search_dir.to_string_lossy()),
            glob::Pattern::escape(&config.archive_suffix)
        );

        let paths = glob::glob(&pattern).map_err(|e| KurmiError::Config {
            message: format!("Invalid archive search pattern {}: {}", pattern, e),
        })?;

        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    debug!("Found workspace archive: {}", path.display());
                    candidates.push(ArchiveCandidate::from_path(path)?);
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path while searching archives: {}", e),
            }
        }
    }

    candidates.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(candidates)
}
