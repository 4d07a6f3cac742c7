use crate::catalog::{RemovalPlan, VendorCatalog, VendorScanner};
use crate::config::Config;
use crate::error::{KurmiError, Result};
use crate::pruner::{PruneReport, VendorPruner};
use crate::selection::{SelectionSession, VENDOR_PRESETS};
use crate::ui::menu::{self, MenuIo, MenuOutcome};
use crate::ui::{progress, OutputFormatter, OutputMode, ProgressManager};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// How a filter session ended.
#[derive(Debug)]
pub enum FilterOutcome {
    Pruned(PruneReport),
    /// The operator quit the menu or declined the confirmation.
    Aborted,
}

pub struct VendorFilter {
    config: Config,
    root: PathBuf,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl VendorFilter {
    pub fn new<P: Into<PathBuf>>(
        config: Config,
        root: P,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        Self {
            config,
            root: root.into(),
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            progress_manager: ProgressManager::new(!quiet && output_mode == OutputMode::Human),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan, select, confirm and prune. The directory tree is only modified
    /// after an explicit confirmation, or when nothing needs removing.
    pub fn run<R: BufRead, W: Write>(&self, io: &mut MenuIo<R, W>) -> Result<FilterOutcome> {
        if !self.root.is_dir() {
            return Err(KurmiError::ExtractionDirNotFound {
                path: self.root.display().to_string(),
            });
        }

        let catalog = self.scan()?;
        menu::write_vendor_summary(io.output(), &catalog)?;

        let mut session =
            SelectionSession::new(catalog.vendor_names()).with_presets(VENDOR_PRESETS);
        let outcome = menu::run_selection_menu(
            io,
            &mut session,
            "SELECT VENDORS TO KEEP (others will be removed)",
            |vendor| format!("(in {} categories)", catalog.category_count(vendor)),
        )?;

        if outcome == MenuOutcome::Cancelled {
            info!("Vendor selection cancelled, no changes made");
            writeln!(io.output(), "Cancelled. No changes made.")?;
            return Ok(FilterOutcome::Aborted);
        }

        let kept = session.kept_items();
        let plan = catalog.removal_plan(session.selected());
        menu::write_removal_plan(io.output(), &kept, &plan)?;

        if !plan.is_empty() {
            let question = format!("Remove {} vendor directories?", plan.directory_count());
            if !menu::confirm(io, &question)? {
                info!("Removal declined, no changes made");
                writeln!(io.output(), "Aborted. No changes made.")?;
                return Ok(FilterOutcome::Aborted);
            }
        }

        let kept = kept.into_iter().map(str::to_string).collect();
        Ok(FilterOutcome::Pruned(self.prune(&plan, kept)))
    }

    fn scan(&self) -> Result<VendorCatalog> {
        let spinner = self.progress_manager.create_spinner("Scanning vendor directories");
        let scanner = VendorScanner::new(&self.root, self.config.scanned_categories());
        let catalog = scanner.scan();
        spinner.finish_and_clear();

        let catalog = catalog?;
        self.output_formatter.debug(&format!(
            "Found {} vendors in {}",
            catalog.len(),
            self.root.display()
        ));
        Ok(catalog)
    }

    fn prune(&self, plan: &RemovalPlan, kept: Vec<String>) -> PruneReport {
        if !plan.is_empty() {
            self.output_formatter.start_operation("Removing vendor directories");
        }

        let removal_progress = self
            .progress_manager
            .create_removal_progress(plan.directory_count() as u64);
        let progress_callback = {
            let pb = removal_progress.clone();
            move |category: &str, vendor: &str| {
                progress::update_removal_progress(&pb, category, vendor)
            }
        };

        let report = VendorPruner::new(&self.root).prune(plan, kept, Some(&progress_callback));
        progress::finish_progress_with_summary(
            &removal_progress,
            &format!("Removed {} directories", report.total_removed()),
        );

        if report.total_failed() > 0 {
            self.output_formatter.warning(&format!(
                "{} vendor directories could not be removed, see the log for details",
                report.total_failed()
            ));
        }

        report
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    fn io(input: &str) -> MenuIo<Cursor<Vec<u8>>, Vec<u8>> {
        MenuIo::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn filter(root: &Path) -> VendorFilter {
        VendorFilter::new(Config::default(), root, OutputMode::Plain, 0, true)
    }

    fn layout(root: &Path) {
        for dir in [
            "widgets/Cisco",
            "widgets/Microsoft",
            "widgets/webex",
            "emails/webex",
            "emails/common",
            "scenarios/webex",
        ] {
            fs::create_dir_all(root.join(dir)).unwrap();
            fs::write(root.join(dir).join("file.js"), dir).unwrap();
        }
    }

    fn tree(root: &Path) -> Vec<String> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .map(|e| {
                e.unwrap()
                    .path()
                    .strip_prefix(root)
                    .unwrap()
                    .display()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_preset_toggle_and_confirm_removes_only_unkept() {
        let root = TempDir::new().unwrap();
        layout(root.path());

        // Menu order: Cisco, Microsoft, common, webex.
        let mut menu = io("cisco\n2\ndone\nyes\n");
        let outcome = filter(root.path()).run(&mut menu).unwrap();

        let FilterOutcome::Pruned(report) = outcome else {
            panic!("expected a prune report");
        };
        assert_eq!(report.removed_vendors, vec!["webex".to_string()]);
        assert_eq!(report.total_removed(), 2);
        assert_eq!(report.total_failed(), 0);
        assert_eq!(report.kept_vendors, vec!["Cisco", "Microsoft", "common"]);

        assert!(!root.path().join("widgets/webex").exists());
        assert!(!root.path().join("emails/webex").exists());
        assert!(root.path().join("widgets/Cisco/file.js").exists());
        assert!(root.path().join("widgets/Microsoft/file.js").exists());
        assert!(root.path().join("emails/common/file.js").exists());
        assert!(root.path().join("scenarios/webex/file.js").exists());

        let rendered = String::from_utf8(menu.into_output()).unwrap();
        assert!(rendered.contains("VENDOR DISTRIBUTION BY CATEGORY"));
        assert!(rendered.contains("(yes/no)"));
    }

    #[test]
    fn test_quit_leaves_tree_untouched() {
        let root = TempDir::new().unwrap();
        layout(root.path());
        let before = tree(root.path());

        let outcome = filter(root.path()).run(&mut io("none\nq\n")).unwrap();

        assert!(matches!(outcome, FilterOutcome::Aborted));
        assert_eq!(tree(root.path()), before);
    }

    #[test]
    fn test_declined_confirmation_leaves_tree_untouched() {
        let root = TempDir::new().unwrap();
        layout(root.path());
        let before = tree(root.path());

        let outcome = filter(root.path()).run(&mut io("none\ndone\nno\n")).unwrap();

        assert!(matches!(outcome, FilterOutcome::Aborted));
        assert_eq!(tree(root.path()), before);
    }

    #[test]
    fn test_end_of_input_cancels() {
        let root = TempDir::new().unwrap();
        layout(root.path());
        let before = tree(root.path());

        let outcome = filter(root.path()).run(&mut io("1\n")).unwrap();

        assert!(matches!(outcome, FilterOutcome::Aborted));
        assert_eq!(tree(root.path()), before);
    }

    #[test]
    fn test_empty_catalog_reports_zero_statistics() {
        let root = TempDir::new().unwrap();

        let outcome = filter(root.path()).run(&mut io("done\n")).unwrap();

        let FilterOutcome::Pruned(report) = outcome else {
            panic!("expected a prune report");
        };
        assert_eq!(report.total_removed(), 0);
        assert_eq!(report.total_failed(), 0);
        assert_eq!(report.total_kept(), 0);
    }

    #[test]
    fn test_keeping_everything_needs_no_confirmation() {
        let root = TempDir::new().unwrap();
        layout(root.path());
        let before = tree(root.path());

        let outcome = filter(root.path()).run(&mut io("all\ndone\n")).unwrap();

        let FilterOutcome::Pruned(report) = outcome else {
            panic!("expected a prune report");
        };
        assert_eq!(report.total_removed(), 0);
        assert_eq!(report.total_kept(), 5);
        assert_eq!(tree(root.path()), before);
    }

    #[test]
    fn test_missing_root() {
        let root = TempDir::new().unwrap();
        let result = filter(&root.path().join("absent")).run(&mut io(""));
        assert!(matches!(result, Err(KurmiError::ExtractionDirNotFound { .. })));
    }
}
