use std::path::Path;

/// Lightweight classification of an entry's kind within a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    /// The entry does not exist.
    NotFound,
    /// The entry exists and is a directory (or an archive's virtual directory).
    Directory,
    /// The entry exists and is a regular file.
    File,
    /// The entry exists but is neither a regular file nor a directory
    /// (for example: socket, FIFO, block device).
    Other,
}

impl PathType {
    /// Classify an on-disk `path`, following symlinks.
    ///
    /// A dangling symlink reports `NotFound` since there is nothing to list
    /// or sniff behind it.
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::metadata(path.as_ref()) {
            Err(_) => PathType::NotFound,
            Ok(meta) if meta.is_dir() => PathType::Directory,
            Ok(meta) if meta.is_file() => PathType::File,
            Ok(_) => PathType::Other,
        }
    }

    pub fn is_dir(self) -> bool {
        self == PathType::Directory
    }
}
