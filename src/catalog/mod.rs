pub mod archive_finder;
pub mod category;
pub mod vendor_scanner;

pub use archive_finder::{find_workspace_archives, ArchiveCandidate};
pub use category::{Category, CategoryClassifier, CATEGORIES};
pub use vendor_scanner::{CategoryRemoval, RemovalPlan, VendorCatalog, VendorScanner};
