use crate::extractor::ExtractionProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    pub fn create_entry_progress(&self, total_entries: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new(total_entries));
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} entries {msg}"
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        );
        pb.set_message("Reading archive...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn create_removal_progress(&self, total_dirs: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new(total_dirs));
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.red} [{elapsed_precise}] [{bar:40.red/yellow}] {pos:>4}/{len:4} directories {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(message.to_string());
        pb
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn update_entry_progress(pb: &ProgressBar, progress: &ExtractionProgress) {
    pb.set_position(progress.entries_seen as u64);

    match progress.current_file {
        Some(ref current_file) => pb.set_message(format!(
            "{} written, last {}",
            progress.files_written, current_file
        )),
        None => pb.set_message(format!("{} written", progress.files_written)),
    }
}

pub fn update_removal_progress(pb: &ProgressBar, category: &str, vendor: &str) {
    pb.inc(1);
    pb.set_message(format!("{}/{}", category, vendor));
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("{} ({:.1}s)", message, pb.elapsed().as_secs_f64()));
}
