use crate::error::{KurmiError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Vendors discovered under each scanned category directory.
///
/// Vendor identity is the exact directory name; no case folding is applied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VendorCatalog {
    by_category: BTreeMap<String, BTreeSet<String>>,
    by_vendor: BTreeMap<String, BTreeSet<String>>,
}

impl VendorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<C: Into<String>, V: Into<String>>(&mut self, category: C, vendor: V) {
        let category = category.into();
        let vendor = vendor.into();

        self.by_vendor
            .entry(vendor.clone())
            .or_default()
            .insert(category.clone());
        self.by_category.entry(category).or_default().insert(vendor);
    }

    /// All distinct vendor names, sorted for stable menu indices.
    pub fn vendor_names(&self) -> Vec<String> {
        self.by_vendor.keys().cloned().collect()
    }

    pub fn category_count(&self, vendor: &str) -> usize {
        self.by_vendor.get(vendor).map_or(0, |c| c.len())
    }

    /// Category names that contained at least one vendor, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.by_category.keys().map(String::as_str)
    }

    pub fn vendors_in(&self, category: &str) -> impl Iterator<Item = &str> {
        self.by_category
            .get(category)
            .into_iter()
            .flat_map(|v| v.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.by_vendor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_vendor.is_empty()
    }

    /// Vendor directories to delete per category when `keep` is retained.
    pub fn removal_plan(&self, keep: &BTreeSet<String>) -> RemovalPlan {
        let mut plan = RemovalPlan::default();

        for (category, vendors) in &self.by_category {
            let (kept, removed): (Vec<&String>, Vec<&String>) =
                vendors.iter().partition(|v| keep.contains(*v));

            plan.entries.push(CategoryRemoval {
                category: category.clone(),
                remove: removed.into_iter().cloned().collect(),
                keep: kept.into_iter().cloned().collect(),
            });
        }

        plan.vendors = self
            .by_vendor
            .keys()
            .filter(|v| !keep.contains(*v))
            .cloned()
            .collect();

        plan
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RemovalPlan {
    pub entries: Vec<CategoryRemoval>,
    /// Distinct vendor names being removed (catalog minus selection).
    pub vendors: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRemoval {
    pub category: String,
    pub remove: Vec<String>,
    pub keep: Vec<String>,
}

impl RemovalPlan {
    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    pub fn directory_count(&self) -> usize {
        self.entries.iter().map(|e| e.remove.len()).sum()
    }
}

pub struct VendorScanner {
    root: PathBuf,
    categories: Vec<String>,
}

impl VendorScanner {
    pub fn new<P: Into<PathBuf>>(root: P, categories: Vec<String>) -> Self {
        Self {
            root: root.into(),
            categories,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scan(&self) -> Result<VendorCatalog> {
        if !self.root.is_dir() {
            return Err(KurmiError::ExtractionDirNotFound {
                path: self.root.display().to_string(),
            });
        }

        info!("Scanning for vendors in {}", self.root.display());
        let mut catalog = VendorCatalog::new();

        for category in &self.categories {
            let category_dir = self.root.join(category);
            if !category_dir.is_dir() {
                debug!("Category directory {} not present, skipping", category);
                continue;
            }

            debug!("Scanning category: {}", category);
            let walker = WalkDir::new(&category_dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(false)
                .sort_by_file_name();

            for entry in walker {
                let entry = entry.map_err(|e| {
                    KurmiError::Io(e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::other(format!(
                            "failed to read {}",
                            category_dir.display()
                        ))
                    }))
                })?;

                if !entry.file_type().is_dir() {
                    continue;
                }

                // Vendors are deleted by joining the name back onto the
                // category path, so only names that round-trip are listed.
                let Some(vendor) = entry.file_name().to_str() else {
                    warn!(
                        "Skipping vendor directory with non UTF-8 name: {}",
                        entry.path().display()
                    );
                    continue;
                };
                catalog.record(category.as_str(), vendor);
            }
        }

        info!(
            "Found {} unique vendors across {} categories",
            catalog.len(),
            catalog.by_category.len()
        );

        Ok(catalog)
    }
}
