use crate::catalog::CategoryClassifier;
use crate::extractor::ExtractionProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub archive: String,
    pub output_directory: String,
    pub categories: Vec<CategoryCount>,
    pub total_files: usize,
    pub total_bytes: u64,
    pub unmatched: usize,
    pub rejected: Vec<String>,
    pub extraction_duration: Duration,
    pub extraction_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub description: String,
    pub files: usize,
}

impl ExtractionReport {
    /// Lists every selected category, including those with no files, in
    /// declaration order.
    pub fn new(
        archive: &Path,
        output_directory: &Path,
        classifier: &CategoryClassifier,
        progress: &ExtractionProgress,
    ) -> Self {
        let categories = classifier
            .categories()
            .iter()
            .map(|c| CategoryCount {
                category: c.name.to_string(),
                description: c.description.to_string(),
                files: progress.category_count(c.name),
            })
            .collect();

        Self {
            archive: archive.display().to_string(),
            output_directory: output_directory.display().to_string(),
            categories,
            total_files: progress.files_written,
            total_bytes: progress.bytes_written,
            unmatched: progress.unmatched,
            rejected: progress.rejected.clone(),
            extraction_duration: progress.elapsed(),
            extraction_time: Utc::now(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.rejected.is_empty()
    }
}
