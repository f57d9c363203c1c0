pub mod app;
pub mod fs_op;
#[path = "runner/mod.rs"]
pub mod runner;

pub use crate::app::{FileData, FileDataProvider, Settings};
pub use crate::fs_op::{ErrorKind, ListError};
