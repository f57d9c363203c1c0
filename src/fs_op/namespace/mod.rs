//! Directory-like roots the segment walker can resolve paths in.
//!
//! A namespace is either the real filesystem below a base directory or the
//! virtual tree of an opened archive. All locations are expressed as
//! [`NsPath`] values relative to the namespace root.

pub mod archive;
pub mod disk;

pub use archive::ZipNamespace;
pub use disk::DiskNamespace;

use std::io;
use std::path::PathBuf;

use crate::fs_op::error::ListError;
use crate::fs_op::path::NsPath;
use crate::fs_op::stat::PathType;

/// A single node found while probing or listing a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceEntry {
    /// Location inside the namespace. Never exposed to callers.
    pub location: NsPath,
    /// Display name (last component; empty for the root).
    pub name: String,
    /// Only `PathType::File` entries may have their content read.
    pub kind: PathType,
}

impl NamespaceEntry {
    pub fn new(location: NsPath, kind: PathType) -> Self {
        let name = location.name().unwrap_or_default().to_string();
        NamespaceEntry {
            location,
            name,
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// Read-only view of a directory tree.
pub trait Namespace {
    /// Short human-readable label used in logs.
    fn describe(&self) -> String;

    /// Kind of the entry at `location`.
    fn kind_of(&self, location: &NsPath) -> PathType;

    /// Backend-specific containment check run after `location` is known to
    /// exist. Lexical containment is already guaranteed by `NsPath`.
    fn check_contained(&self, _location: &NsPath) -> Result<(), ListError> {
        Ok(())
    }

    /// Immediate children of the directory at `location`, in backend order.
    fn read_dir(&self, location: &NsPath) -> Result<Vec<NamespaceEntry>, ListError>;

    /// Read at most `limit` bytes from the start of the file at `location`.
    fn read_prefix(&self, location: &NsPath, limit: usize) -> io::Result<Vec<u8>>;

    /// Host filesystem path backing `location`, if this namespace can hand one
    /// out. Containers can only be opened from entries that have one.
    fn host_file(&self, location: &NsPath) -> Option<PathBuf>;

    /// Entry describing `location`, if it exists.
    fn entry(&self, location: &NsPath) -> Option<NamespaceEntry> {
        match self.kind_of(location) {
            PathType::NotFound => None,
            kind => Some(NamespaceEntry::new(location.clone(), kind)),
        }
    }
}
