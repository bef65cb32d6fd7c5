//! Output formatting for CLI.

mod json;
mod progress;
mod table;

pub use json::JsonOutput;
pub use progress::ProgressBar;
pub use table::TableOutput;
