use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use super::{Namespace, NamespaceEntry};
use crate::fs_op::error::ListError;
use crate::fs_op::path::NsPath;
use crate::fs_op::stat::PathType;

/// The real filesystem below a base directory.
#[derive(Debug, Clone)]
pub struct DiskNamespace {
    base: PathBuf,
}

impl DiskNamespace {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        DiskNamespace { base: base.into() }
    }

    fn host_path(&self, location: &NsPath) -> PathBuf {
        self.base.join(location.to_relative_path())
    }
}

impl Namespace for DiskNamespace {
    fn describe(&self) -> String {
        self.base.display().to_string()
    }

    fn kind_of(&self, location: &NsPath) -> PathType {
        PathType::of(self.host_path(location))
    }

    /// Symlinks may still lead outside the base even though the lexical path
    /// stays inside it, so compare canonical forms.
    fn check_contained(&self, location: &NsPath) -> Result<(), ListError> {
        let base = fs::canonicalize(&self.base).map_err(|e| ListError::io(&self.base, e))?;
        let host = self.host_path(location);
        let resolved = fs::canonicalize(&host).map_err(|e| ListError::io(&host, e))?;
        if resolved.starts_with(&base) {
            Ok(())
        } else {
            tracing::debug!(
                location = %location,
                resolved = %resolved.display(),
                "entry resolves outside base directory"
            );
            Err(ListError::InvalidPath(location.to_string()))
        }
    }

    fn read_dir(&self, location: &NsPath) -> Result<Vec<NamespaceEntry>, ListError> {
        let dir = self.host_path(location);
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| ListError::io(&dir, e))? {
            let entry = entry.map_err(|e| ListError::io(&dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks, so a link to a FIFO reports `Other` too.
            let kind = PathType::of(entry.path());
            entries.push(NamespaceEntry {
                location: location.child(&name),
                name,
                kind,
            });
        }
        Ok(entries)
    }

    fn read_prefix(&self, location: &NsPath, limit: usize) -> io::Result<Vec<u8>> {
        let file = fs::File::open(self.host_path(location))?;
        let mut buf = Vec::with_capacity(limit);
        file.take(limit as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn host_file(&self, location: &NsPath) -> Option<PathBuf> {
        Some(self.host_path(location))
    }
}
