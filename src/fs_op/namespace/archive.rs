//! Zip archives mounted as a namespace.
//!
//! The archive index is read once when the namespace is opened. Directories
//! that only exist implicitly (as a prefix of some file name) are synthesised
//! so the tree can be walked like a real one.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use zip::ZipArchive;

use super::{Namespace, NamespaceEntry};
use crate::fs_op::error::ListError;
use crate::fs_op::path::NsPath;
use crate::fs_op::stat::PathType;

#[derive(Debug)]
struct Node {
    is_dir: bool,
    /// Index in the archive; `None` for synthesised directories.
    index: Option<usize>,
    /// Child names in first-seen order.
    children: Vec<String>,
}

impl Node {
    fn dir(index: Option<usize>) -> Self {
        Node {
            is_dir: true,
            index,
            children: Vec::new(),
        }
    }
}

/// An opened zip archive. Closing happens on drop.
pub struct ZipNamespace {
    source: PathBuf,
    archive: RefCell<ZipArchive<File>>,
    nodes: HashMap<NsPath, Node>,
}

impl ZipNamespace {
    /// Open the archive at `path` and index its entries.
    pub fn open(path: &Path) -> Result<Self, ListError> {
        let file = File::open(path).map_err(|e| ListError::io(path, e))?;
        let mut archive = ZipArchive::new(file).map_err(|source| ListError::Archive {
            path: path.to_path_buf(),
            source,
        })?;

        let mut nodes = HashMap::new();
        nodes.insert(NsPath::root(), Node::dir(None));

        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i).map_err(|source| ListError::Archive {
                path: path.to_path_buf(),
                source,
            })?;
            let Some(name) = entry.enclosed_name().map(|p| p.to_path_buf()) else {
                tracing::warn!(
                    entry = entry.name(),
                    archive = %path.display(),
                    "skipping unsafe archive entry name"
                );
                continue;
            };
            let is_dir = entry.is_dir();
            insert_entry(&mut nodes, &name, i, is_dir);
        }

        tracing::debug!(
            archive = %path.display(),
            entries = nodes.len() - 1,
            "opened archive namespace"
        );
        Ok(ZipNamespace {
            source: path.to_path_buf(),
            archive: RefCell::new(archive),
            nodes,
        })
    }
}

fn insert_entry(nodes: &mut HashMap<NsPath, Node>, name: &Path, index: usize, is_dir: bool) {
    let mut parts: Vec<String> = Vec::new();
    for component in name.components() {
        match component {
            Component::Normal(s) => parts.push(s.to_string_lossy().into_owned()),
            Component::ParentDir => {
                // `enclosed_name` never lets this climb above the root.
                if parts.pop().is_none() {
                    return;
                }
            }
            _ => {}
        }
    }
    if parts.is_empty() {
        return;
    }

    let mut parent = NsPath::root();
    for (depth, part) in parts.iter().enumerate() {
        let location = parent.child(part);
        let last = depth + 1 == parts.len();
        if !nodes.contains_key(&location) {
            let node = if last && !is_dir {
                Node {
                    is_dir: false,
                    index: Some(index),
                    children: Vec::new(),
                }
            } else {
                Node::dir(last.then_some(index))
            };
            nodes.insert(location.clone(), node);
            if let Some(p) = nodes.get_mut(&parent) {
                p.children.push(part.clone());
            }
        } else if last {
            // Explicit directory entry listed after one of its children.
            if let Some(existing) = nodes.get_mut(&location) {
                if existing.index.is_none() {
                    existing.index = Some(index);
                }
            }
        }
        parent = location;
    }
}

impl Namespace for ZipNamespace {
    fn describe(&self) -> String {
        format!("zip:{}", self.source.display())
    }

    fn kind_of(&self, location: &NsPath) -> PathType {
        match self.nodes.get(location) {
            None => PathType::NotFound,
            Some(node) if node.is_dir => PathType::Directory,
            Some(_) => PathType::File,
        }
    }

    fn read_dir(&self, location: &NsPath) -> Result<Vec<NamespaceEntry>, ListError> {
        let node = self
            .nodes
            .get(location)
            .ok_or_else(|| ListError::NotFound(location.to_string()))?;
        if !node.is_dir {
            return Err(ListError::NotExpandable(location.to_string()));
        }
        Ok(node
            .children
            .iter()
            .map(|name| {
                let child = location.child(name);
                let kind = self.kind_of(&child);
                NamespaceEntry {
                    location: child,
                    name: name.clone(),
                    kind,
                }
            })
            .collect())
    }

    fn read_prefix(&self, location: &NsPath, limit: usize) -> io::Result<Vec<u8>> {
        let index = self
            .nodes
            .get(location)
            .and_then(|n| n.index)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, location.to_string()))?;
        let mut archive = self.archive.borrow_mut();
        let entry = archive.by_index(index).map_err(io::Error::other)?;
        let mut buf = Vec::with_capacity(limit);
        entry.take(limit as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Entries inside an archive have no host file of their own, so a zip
    /// nested in a zip cannot be opened.
    fn host_file(&self, _location: &NsPath) -> Option<PathBuf> {
        None
    }
}

impl Drop for ZipNamespace {
    fn drop(&mut self) {
        tracing::debug!(archive = %self.source.display(), "closed archive namespace");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, dirs: &[&str], files: &[(&str, &str)]) {
        let mut zw = zip::ZipWriter::new(File::create(path).unwrap());
        let opts = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for d in dirs {
            zw.add_directory(*d, opts).unwrap();
        }
        for (name, data) in files {
            zw.start_file(*name, opts).unwrap();
            zw.write_all(data.as_bytes()).unwrap();
        }
        zw.finish().unwrap();
    }

    #[test]
    fn lists_explicit_and_implicit_directories() {
        let td = tempdir().unwrap();
        let zp = td.path().join("a.zip");
        write_zip(&zp, &["docs/"], &[("docs/readme.txt", "hi"), ("src/lib/mod.rs", "//")]);

        let ns = ZipNamespace::open(&zp).unwrap();
        let root: Vec<_> = ns
            .read_dir(&NsPath::root())
            .unwrap()
            .into_iter()
            .map(|e| (e.name.clone(), e.is_dir()))
            .collect();
        assert_eq!(root, vec![("docs".to_string(), true), ("src".to_string(), true)]);

        let lib = NsPath::root().join_segment("src/lib").unwrap();
        assert_eq!(ns.kind_of(&lib), PathType::Directory);
        let files = ns.read_dir(&lib).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "mod.rs");
        assert_eq!(files[0].kind, PathType::File);
    }

    #[test]
    fn read_prefix_reads_entry_content() {
        let td = tempdir().unwrap();
        let zp = td.path().join("a.zip");
        write_zip(&zp, &[], &[("notes.txt", "hello archive")]);

        let ns = ZipNamespace::open(&zp).unwrap();
        let loc = NsPath::root().child("notes.txt");
        assert_eq!(ns.kind_of(&loc), PathType::File);
        assert_eq!(ns.read_prefix(&loc, 5).unwrap(), b"hello".to_vec());
    }

    #[test]
    fn synthesised_directory_has_no_content() {
        let td = tempdir().unwrap();
        let zp = td.path().join("a.zip");
        write_zip(&zp, &[], &[("dir/file", "x")]);

        let ns = ZipNamespace::open(&zp).unwrap();
        assert!(ns.read_prefix(&NsPath::root().child("dir"), 8).is_err());
        assert!(ns.host_file(&NsPath::root().child("dir")).is_none());
    }

    #[test]
    fn parent_components_in_entry_names_are_resolved() {
        let td = tempdir().unwrap();
        let zp = td.path().join("a.zip");
        write_zip(&zp, &[], &[("a/../b.txt", "x"), ("c/d/../e.txt", "y")]);

        let ns = ZipNamespace::open(&zp).unwrap();
        let root: Vec<_> = ns
            .read_dir(&NsPath::root())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(root, vec!["b.txt".to_string(), "c".to_string()]);
        assert_eq!(ns.kind_of(&NsPath::root().child("a")), PathType::NotFound);

        let c = NsPath::root().child("c");
        let names: Vec<_> = ns.read_dir(&c).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["e.txt".to_string()]);
        assert_eq!(ns.read_prefix(&NsPath::root().child("b.txt"), 8).unwrap(), b"x".to_vec());
    }

    #[test]
    fn corrupt_archive_is_archive_error() {
        let td = tempdir().unwrap();
        let zp = td.path().join("broken.zip");
        std::fs::write(&zp, b"definitely not a zip").unwrap();

        let err = ZipNamespace::open(&zp).err().unwrap();
        assert!(matches!(err, ListError::Archive { .. }));
    }
}
