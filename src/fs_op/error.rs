use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse failure categories adapters map to user-visible responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A segment or the final position does not exist.
    NotFound,
    /// A segment escapes the namespace it is resolved in.
    InvalidPath,
    /// The container type is recognised but cannot be expanded.
    UnsupportedContainer,
    /// The resolved entry is a leaf.
    NotExpandable,
    /// Low-level failure outside the resolution taxonomy.
    Io,
}

/// Errors produced while resolving and listing a segment path.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("file doesn't exist: {0}")]
    NotFound(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("unsupported container: {0}")]
    UnsupportedContainer(String),

    #[error("not a directory: {0}")]
    NotExpandable(String),

    /// Wrapper for underlying IO errors, with the location that failed.
    #[error("I/O error at `{}`: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The archive could not be opened or its index could not be read.
    #[error("cannot read archive `{}`: {}", path.display(), source)]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl ListError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListError::NotFound(_) => ErrorKind::NotFound,
            ListError::InvalidPath(_) => ErrorKind::InvalidPath,
            ListError::UnsupportedContainer(_) => ErrorKind::UnsupportedContainer,
            ListError::NotExpandable(_) => ErrorKind::NotExpandable,
            ListError::Io { .. } | ListError::Archive { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ListError::Io {
            path: path.into(),
            source,
        }
    }
}
