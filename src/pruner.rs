use crate::catalog::RemovalPlan;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPruneStats {
    pub category: String,
    pub removed: usize,
    pub failed: usize,
    pub kept: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PruneReport {
    pub root: String,
    pub categories: Vec<CategoryPruneStats>,
    pub kept_vendors: Vec<String>,
    pub removed_vendors: Vec<String>,
    pub failures: Vec<String>,
    pub duration: Duration,
}

impl PruneReport {
    pub fn total_removed(&self) -> usize {
        self.categories.iter().map(|c| c.removed).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.categories.iter().map(|c| c.failed).sum()
    }

    pub fn total_kept(&self) -> usize {
        self.categories.iter().map(|c| c.kept).sum()
    }
}

/// Deletes vendor directories listed in a [`RemovalPlan`].
///
/// Deletion is best effort: a directory that cannot be removed is logged and
/// counted, and the remaining directories are still processed.
pub struct VendorPruner {
    root: PathBuf,
}

impl VendorPruner {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn prune(
        &self,
        plan: &RemovalPlan,
        kept_vendors: Vec<String>,
        progress_callback: Option<&dyn Fn(&str, &str)>,
    ) -> PruneReport {
        let start = Instant::now();
        info!(
            "Starting vendor removal in {} (keeping {} vendors)",
            self.root.display(),
            kept_vendors.len()
        );

        let mut report = PruneReport {
            root: self.root.display().to_string(),
            kept_vendors,
            removed_vendors: plan.vendors.iter().cloned().collect(),
            ..PruneReport::default()
        };

        for entry in &plan.entries {
            let mut stats = CategoryPruneStats {
                category: entry.category.clone(),
                kept: entry.keep.len(),
                ..CategoryPruneStats::default()
            };

            for vendor in &entry.remove {
                if let Some(callback) = progress_callback {
                    callback(&entry.category, vendor);
                }

                let vendor_dir = self.root.join(&entry.category).join(vendor);
                info!("Removing: {}/{}", entry.category, vendor);

                match fs::remove_dir_all(&vendor_dir) {
                    Ok(()) => stats.removed += 1,
                    Err(e) => {
                        error!("Failed to remove {}: {}", vendor_dir.display(), e);
                        stats.failed += 1;
                        report
                            .failures
                            .push(format!("{}: {}", vendor_dir.display(), e));
                    }
                }
            }

            report.categories.push(stats);
        }

        report.duration = start.elapsed();
        info!(
            "Vendor removal complete: {} removed, {} failed, {} kept",
            report.total_removed(),
            report.total_failed(),
            report.total_kept()
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VendorScanner;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn keep(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn categories() -> Vec<String> {
        vec!["widgets".to_string(), "emails".to_string()]
    }

    #[test]
    fn test_prune_removes_unkept_vendors_everywhere() {
        let root = TempDir::new().unwrap();
        for dir in ["widgets/Cisco", "widgets/webex", "emails/webex", "emails/common"] {
            fs::create_dir_all(root.path().join(dir)).unwrap();
            fs::write(root.path().join(dir).join("file.js"), "x").unwrap();
        }
        fs::create_dir_all(root.path().join("scenarios/webex")).unwrap();

        let catalog = VendorScanner::new(root.path(), categories()).scan().unwrap();
        let plan = catalog.removal_plan(&keep(&["Cisco", "common"]));

        let report = VendorPruner::new(root.path()).prune(&plan, vec![], None);

        assert_eq!(report.total_removed(), 2);
        assert_eq!(report.total_failed(), 0);
        assert_eq!(report.total_kept(), 2);
        assert!(!root.path().join("widgets/webex").exists());
        assert!(!root.path().join("emails/webex").exists());
        assert!(root.path().join("widgets/Cisco/file.js").exists());
        assert!(root.path().join("emails/common").exists());
        assert!(root.path().join("scenarios/webex").exists());
    }

    #[test]
    fn test_prune_continues_after_failure() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("widgets/alpha")).unwrap();
        fs::create_dir_all(root.path().join("widgets/beta")).unwrap();

        let catalog = VendorScanner::new(root.path(), categories()).scan().unwrap();
        let plan = catalog.removal_plan(&BTreeSet::new());

        // Vanishes between scan and prune, so its removal fails.
        fs::remove_dir_all(root.path().join("widgets/alpha")).unwrap();

        let report = VendorPruner::new(root.path()).prune(&plan, vec![], None);

        assert_eq!(report.total_failed(), 1);
        assert_eq!(report.total_removed(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(!root.path().join("widgets/beta").exists());
    }

    #[test]
    fn test_empty_plan() {
        let root = TempDir::new().unwrap();
        let catalog = VendorScanner::new(root.path(), categories()).scan().unwrap();
        let plan = catalog.removal_plan(&BTreeSet::new());

        let calls = std::cell::Cell::new(0usize);
        let callback = |_: &str, _: &str| calls.set(calls.get() + 1);
        let report = VendorPruner::new(root.path()).prune(&plan, vec![], Some(&callback));

        assert_eq!(report.total_removed(), 0);
        assert_eq!(report.total_kept(), 0);
        assert!(report.categories.is_empty());
        assert_eq!(calls.get(), 0);
    }
}
