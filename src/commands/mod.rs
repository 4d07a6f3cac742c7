pub mod filter;
pub mod parse;

pub use filter::{FilterOutcome, VendorFilter};
pub use parse::WorkspaceParser;
