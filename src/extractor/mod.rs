pub mod archive_extractor;
pub mod report;

pub use archive_extractor::{ArchiveExtractor, ExtractionProgress};
pub use report::{CategoryCount, ExtractionReport};
