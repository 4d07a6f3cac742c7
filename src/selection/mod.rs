pub mod command;
pub mod engine;
pub mod presets;

pub use command::{Command, Selector};
pub use engine::{Notice, SelectionSession, Transition};
pub use presets::{Preset, VENDOR_PRESETS};
