use crate::catalog::category::WORKSPACE_MANIFEST;
use crate::catalog::CategoryClassifier;
use crate::error::{KurmiError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub entries_seen: usize,
    pub total_entries: usize,
    pub files_written: usize,
    pub bytes_written: u64,
    pub unmatched: usize,
    pub rejected: Vec<String>,
    pub per_category: BTreeMap<String, usize>,
    pub current_file: Option<String>,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new(total_entries: usize) -> Self {
        Self {
            entries_seen: 0,
            total_entries,
            files_written: 0,
            bytes_written: 0,
            unmatched: 0,
            rejected: Vec::new(),
            per_category: BTreeMap::new(),
            current_file: None,
            start_time: Instant::now(),
        }
    }

    pub fn record_written(&mut self, category: &str, filename: String, bytes: u64) {
        self.files_written += 1;
        self.bytes_written += bytes;
        *self.per_category.entry(category.to_string()).or_insert(0) += 1;
        self.current_file = Some(filename);
    }

    pub fn percentage(&self) -> f64 {
        if self.total_entries == 0 {
            0.0
        } else {
            (self.entries_seen as f64 / self.total_entries as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn category_count(&self, category: &str) -> usize {
        self.per_category.get(category).copied().unwrap_or(0)
    }
}

pub struct ArchiveExtractor {
    classifier: CategoryClassifier,
    output_root: PathBuf,
}

impl ArchiveExtractor {
    pub fn new<P: Into<PathBuf>>(classifier: CategoryClassifier, output_root: P) -> Self {
        Self {
            classifier,
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    /// Streams every member of `archive_path` into
    /// `<output_root>/<category>/<member path>`.
    ///
    /// Unmatched members are counted and skipped. Any archive read or output
    /// write failure aborts the run.
    pub fn extract(
        &self,
        archive_path: &Path,
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<ExtractionProgress> {
        if !archive_path.is_file() {
            return Err(KurmiError::ArchiveNotFound {
                path: archive_path.display().to_string(),
            });
        }

        info!("Extracting workspace archive {}", archive_path.display());
        let file = fs::File::open(archive_path)?;
        let mut archive =
            zip::ZipArchive::new(file).map_err(|e| KurmiError::archive(archive_path, e))?;

        fs::create_dir_all(&self.output_root)?;

        let mut progress = ExtractionProgress::new(archive.len());

        for i in 0..archive.len() {
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            let mut entry = archive
                .by_index(i)
                .map_err(|e| KurmiError::archive(archive_path, e))?;
            progress.entries_seen += 1;

            if entry.is_dir() {
                continue;
            }

            let name = entry.name().to_string();
            let filename = name.rsplit('/').next().unwrap_or(&name).to_string();

            if filename == WORKSPACE_MANIFEST {
                debug!("Skipping workspace manifest {}", name);
                continue;
            }

            let Some(category) = self.classifier.classify(&filename) else {
                debug!("No category for {}", name);
                progress.unmatched += 1;
                continue;
            };

            let Some(relative_path) = entry.enclosed_name() else {
                warn!("Rejecting archive member with unsafe path: {}", name);
                progress.rejected.push(name);
                continue;
            };

            let dest_path = self.output_root.join(category.name).join(&relative_path);
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let mut writer = BufWriter::new(fs::File::create(&dest_path)?);
            let bytes = std::io::copy(&mut entry, &mut writer)?;
            writer.flush()?;
            drop(writer);

            if let Some(modified) = entry.last_modified() {
                restore_mtime(&dest_path, &modified);
            }

            debug!("Copied: {} -> {}/", relative_path.display(), category.name);
            progress.record_written(category.name, filename, bytes);
        }

        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        info!(
            "Extracted {} files ({} unmatched, {} rejected)",
            progress.files_written,
            progress.unmatched,
            progress.rejected.len()
        );

        Ok(progress)
    }
}

fn restore_mtime(path: &Path, modified: &zip::DateTime) {
    let timestamp = chrono::NaiveDate::from_ymd_opt(
        modified.year() as i32,
        modified.month() as u32,
        modified.day() as u32,
    )
    .and_then(|date| {
        date.and_hms_opt(
            modified.hour() as u32,
            modified.minute() as u32,
            modified.second() as u32,
        )
    })
    .map(|datetime| datetime.and_utc().timestamp());

    if let Some(secs) = timestamp {
        if let Err(e) = filetime::set_file_mtime(path, filetime::FileTime::from_unix_time(secs, 0))
        {
            debug!("Could not set modification time on {}: {}", path.display(), e);
        }
    }
}
