//! Content-type detection using extension lookup with magic-number fallback.

use mime_guess::MimeGuess;

use crate::fs_op::namespace::{Namespace, NamespaceEntry};
use crate::fs_op::stat::PathType;

/// Type reported for directories, regardless of backend.
pub const DIRECTORY_TYPE: &str = "directory";
/// Type reported when no probe recognises an entry.
pub const UNKNOWN_TYPE: &str = "<unknown_type>";
/// Default number of leading bytes handed to the content sniffer.
pub const DEFAULT_PROBE_BYTES: usize = 8 * 1024;

/// One detection layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Guess from the file name only; no content is read.
    Extension,
    /// Sniff magic numbers in the first `limit` bytes. Only regular files are
    /// read; opening a FIFO or device could block indefinitely.
    Content { limit: usize },
}

impl Probe {
    /// Return the detected MIME type, or `None` to let the next layer try.
    pub fn detect(&self, ns: &dyn Namespace, entry: &NamespaceEntry) -> Option<String> {
        match *self {
            Probe::Extension => MimeGuess::from_path(&entry.name)
                .first_raw()
                .map(str::to_string),
            Probe::Content { .. } if entry.kind != PathType::File => None,
            Probe::Content { limit } => match ns.read_prefix(&entry.location, limit) {
                Ok(bytes) => infer::get(&bytes).map(|kind| kind.mime_type().to_string()),
                Err(e) => {
                    tracing::debug!(
                        entry = %entry.location,
                        error = %e,
                        "content probe failed, type undetermined"
                    );
                    None
                }
            },
        }
    }
}

/// Ordered list of probes tried until one resolves.
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    probes: Vec<Probe>,
}

impl Default for TypeClassifier {
    fn default() -> Self {
        TypeClassifier::new(DEFAULT_PROBE_BYTES)
    }
}

impl TypeClassifier {
    /// Extension lookup first, then sniffing up to `probe_bytes` of content.
    pub fn new(probe_bytes: usize) -> Self {
        TypeClassifier::with_probes(vec![Probe::Extension, Probe::Content { limit: probe_bytes }])
    }

    pub fn with_probes(probes: Vec<Probe>) -> Self {
        TypeClassifier { probes }
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// Detect the content type of `entry`.
    ///
    /// Directories short-circuit to [`DIRECTORY_TYPE`] and are never handed to
    /// a probe.
    pub fn classify(&self, ns: &dyn Namespace, entry: &NamespaceEntry) -> String {
        if entry.is_dir() {
            return DIRECTORY_TYPE.to_string();
        }
        self.probes
            .iter()
            .find_map(|probe| probe.detect(ns, entry))
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    }
}
