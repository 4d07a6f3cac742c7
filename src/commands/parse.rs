use crate::catalog::{category, find_workspace_archives, CategoryClassifier};
use crate::config::{Config, EXTRACTION_DIR};
use crate::error::{KurmiError, Result};
use crate::extractor::{ArchiveExtractor, ExtractionProgress, ExtractionReport};
use crate::selection::SelectionSession;
use crate::ui::menu::{self, MenuIo, MenuOutcome};
use crate::ui::{progress, OutputFormatter, OutputMode, ProgressManager};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Drives one extraction run: pick an archive, pick categories, extract.
pub struct WorkspaceParser {
    config: Config,
    working_dir: PathBuf,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl WorkspaceParser {
    pub fn new<P: Into<PathBuf>>(
        config: Config,
        working_dir: P,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        Self {
            config,
            working_dir: working_dir.into(),
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            progress_manager: ProgressManager::new(!quiet && output_mode == OutputMode::Human),
        }
    }

    pub fn output_directory(&self) -> PathBuf {
        self.working_dir.join(EXTRACTION_DIR)
    }

    /// Returns [`KurmiError::Cancelled`] when the operator quits a menu.
    pub fn run<R: BufRead, W: Write>(
        &self,
        input: Option<&Path>,
        io: &mut MenuIo<R, W>,
    ) -> Result<ExtractionReport> {
        let archive = self.resolve_archive(input, io)?;
        info!("Selected workspace archive: {}", archive.display());

        let categories = self.select_categories(io)?;
        info!("Selected categories: {}", categories.join(", "));

        let classifier = CategoryClassifier::from_names(&categories);
        let output_dir = self.output_directory();
        let progress = self.extract(&archive, &classifier, &output_dir)?;

        Ok(ExtractionReport::new(&archive, &output_dir, &classifier, &progress))
    }

    fn resolve_archive<R: BufRead, W: Write>(
        &self,
        input: Option<&Path>,
        io: &mut MenuIo<R, W>,
    ) -> Result<PathBuf> {
        if let Some(path) = input {
            let path = self.working_dir.join(path);
            if !path.is_file() {
                return Err(KurmiError::ArchiveNotFound {
                    path: path.display().to_string(),
                });
            }
            return Ok(path);
        }

        self.output_formatter
            .start_operation("Searching for workspace archives");
        let candidates = find_workspace_archives(&self.working_dir, &self.config.discovery)?;

        if candidates.is_empty() {
            return Err(KurmiError::NoArchivesFound {
                searched: self
                    .config
                    .discovery
                    .search_dirs
                    .iter()
                    .map(|d| self.working_dir.join(d).display().to_string())
                    .collect(),
            });
        }

        match menu::select_archive(io, &candidates)? {
            Some(index) => {
                let selected = &candidates[index];
                writeln!(io.output(), "Selected: {}", selected.file_name())?;
                Ok(selected.path.clone())
            }
            None => Err(KurmiError::Cancelled),
        }
    }

    fn select_categories<R: BufRead, W: Write>(
        &self,
        io: &mut MenuIo<R, W>,
    ) -> Result<Vec<String>> {
        let names = category::names().into_iter().map(str::to_string).collect();
        let mut session = SelectionSession::new(names).with_all_selected();

        let outcome = menu::run_selection_menu(
            io,
            &mut session,
            "SELECT CATEGORIES TO EXTRACT",
            |name| {
                category::find(name)
                    .map(|c| format!("- {}", c.description))
                    .unwrap_or_default()
            },
        )?;

        if outcome == MenuOutcome::Cancelled {
            return Err(KurmiError::Cancelled);
        }

        let selected: Vec<String> = session.kept_items().into_iter().map(str::to_string).collect();
        if selected.is_empty() {
            return Err(KurmiError::NoCategoriesSelected);
        }

        let out = io.output();
        writeln!(out)?;
        writeln!(out, "Selected {} categories:", selected.len())?;
        for name in &selected {
            writeln!(out, "  - {}", name)?;
        }

        Ok(selected)
    }

    fn extract(
        &self,
        archive: &Path,
        classifier: &CategoryClassifier,
        output_dir: &Path,
    ) -> Result<ExtractionProgress> {
        self.output_formatter.start_operation(&format!(
            "Extracting {} into {}",
            archive.display(),
            output_dir.display()
        ));

        let entry_progress = self.progress_manager.create_entry_progress(0);
        let progress_callback = {
            let pb = entry_progress.clone();
            move |p: &ExtractionProgress| {
                pb.set_length(p.total_entries as u64);
                progress::update_entry_progress(&pb, p);
            }
        };

        let extractor = ArchiveExtractor::new(classifier.clone(), output_dir);
        let result = extractor.extract(archive, Some(&progress_callback));

        match result {
            Ok(progress) => {
                progress::finish_progress_with_summary(
                    &entry_progress,
                    &format!("Extracted {} files", progress.files_written),
                );
                Ok(progress)
            }
            Err(e) => {
                entry_progress.abandon();
                Err(e)
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &KurmiError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
