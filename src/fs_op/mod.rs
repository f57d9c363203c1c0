//! Filesystem side of the resolver: namespaces, type detection, container
//! dispatch and the error taxonomy.

pub mod detection;
pub mod dispatch;
pub mod error;
pub mod namespace;
pub mod path;
pub mod stat;

pub use detection::{Probe, TypeClassifier, DIRECTORY_TYPE, UNKNOWN_TYPE};
pub use dispatch::{ContainerStrategy, ContainerTable};
pub use error::{ErrorKind, ListError};
