use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Separator used for logical (caller-facing) paths.
pub const SEPARATOR: char = '/';

/// Errors that can occur when joining a user-supplied segment.
#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    /// The segment climbs above the namespace root.
    Escapes(String),
    /// The segment is absolute (root or drive prefix) and would replace the
    /// current position instead of extending it.
    Absolute(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Escapes(s) => write!(f, "segment escapes namespace root: {}", s),
            PathError::Absolute(s) => write!(f, "absolute segment not allowed: {}", s),
        }
    }
}

impl std::error::Error for PathError {}

/// Location of an entry relative to the root of the namespace it lives in.
///
/// A `NsPath` is always normalized: it never holds `.` or `..` components, so
/// it cannot point outside its namespace by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NsPath {
    parts: Vec<String>,
}

impl NsPath {
    /// The namespace root itself.
    pub fn root() -> Self {
        NsPath::default()
    }

    pub fn is_root(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn components(&self) -> &[String] {
        &self.parts
    }

    /// Display name of the entry (last component), `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }

    /// Resolve `segment` against this position.
    ///
    /// Behaviour:
    /// - `.` and empty components are ignored.
    /// - `..` pops one component; popping past the root is an error.
    /// - A root or drive prefix is an error.
    /// - A segment with embedded separators descends several levels at once.
    pub fn join_segment(&self, segment: &str) -> Result<NsPath, PathError> {
        let mut parts = self.parts.clone();
        for component in Path::new(segment).components() {
            match component {
                Component::Normal(s) => parts.push(s.to_string_lossy().into_owned()),
                Component::CurDir => {}
                Component::ParentDir => {
                    if parts.pop().is_none() {
                        return Err(PathError::Escapes(segment.to_string()));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(PathError::Absolute(segment.to_string()));
                }
            }
        }
        Ok(NsPath { parts })
    }

    /// Direct child named `name`. Used for entries produced by a listing, whose
    /// names are single components already.
    pub fn child(&self, name: &str) -> NsPath {
        let mut parts = self.parts.clone();
        parts.push(name.to_string());
        NsPath { parts }
    }

    /// Platform path relative to the namespace root.
    pub fn to_relative_path(&self) -> PathBuf {
        self.parts.iter().collect()
    }
}

impl fmt::Display for NsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.parts.join("/"))
    }
}

/// Build the logical origin from caller-supplied segments.
pub fn origin_of<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/")
}

/// Logical path of a child called `name` listed at `origin`.
pub fn logical_child(origin: &str, name: &str) -> String {
    if origin.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", origin, SEPARATOR, name)
    }
}
