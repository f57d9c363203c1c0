//! Command-line adapter around [`FileDataProvider`](crate::app::FileDataProvider).

pub mod cli;
pub mod logging;

pub use cli::{exit_code, run, Cli};
pub use logging::init_logging;
