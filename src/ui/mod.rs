pub mod menu;
pub mod output;
pub mod progress;

pub use menu::{MenuIo, MenuOutcome};
pub use output::{OutputFormatter, OutputMode};
pub use progress::ProgressManager;
