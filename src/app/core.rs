use std::path::PathBuf;

use tracing::{debug, trace};

use super::settings::Settings;
use super::types::FileData;
use crate::fs_op::detection::{TypeClassifier, DIRECTORY_TYPE};
use crate::fs_op::dispatch::{ContainerStrategy, ContainerTable};
use crate::fs_op::error::ListError;
use crate::fs_op::namespace::{DiskNamespace, Namespace, ZipNamespace};
use crate::fs_op::path::{logical_child, origin_of, NsPath};
use crate::fs_op::stat::PathType;

/// Lists directories addressed by path segments, descending into archives
/// along the way.
///
/// The provider holds only read-only state, so one instance can serve
/// concurrent `list` calls from several threads.
#[derive(Debug, Clone)]
pub struct FileDataProvider {
    base: PathBuf,
    containers: ContainerTable,
    classifier: TypeClassifier,
}

impl FileDataProvider {
    /// Provider rooted at `base` with the default container table and
    /// classifier.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        FileDataProvider::with_parts(base, ContainerTable::default(), TypeClassifier::default())
    }

    pub fn with_parts(
        base: impl Into<PathBuf>,
        containers: ContainerTable,
        classifier: TypeClassifier,
    ) -> Self {
        FileDataProvider {
            base: base.into(),
            containers,
            classifier,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        FileDataProvider::with_parts(
            settings.base_dir.clone(),
            ContainerTable::default(),
            TypeClassifier::new(settings.content_probe_bytes),
        )
    }

    /// List the location named by `segments`.
    ///
    /// An empty slice lists the base directory. Each returned entry carries a
    /// path built from the segments themselves, so archive boundaries crossed
    /// on the way do not show up in the output.
    pub fn list<S: AsRef<str>>(&self, segments: &[S]) -> Result<Vec<FileData>, ListError> {
        let origin = origin_of(segments);
        debug!(base = %self.base.display(), origin = %origin, "listing");
        let disk = DiskNamespace::new(&self.base);
        let mut remaining = segments.iter().map(|s| s.as_ref());
        self.walk(&origin, &disk, NsPath::root(), &mut remaining)
    }

    /// Consume segments inside `ns` starting at `position`, handing over to a
    /// container strategy as soon as a segment lands on a container.
    fn walk<'s>(
        &self,
        origin: &str,
        ns: &dyn Namespace,
        mut position: NsPath,
        remaining: &mut dyn Iterator<Item = &'s str>,
    ) -> Result<Vec<FileData>, ListError> {
        while let Some(segment) = remaining.next() {
            trace!(segment, namespace = %ns.describe(), position = %position, "resolving segment");
            let candidate = position
                .join_segment(segment)
                .map_err(|e| ListError::InvalidPath(e.to_string()))?;
            let Some(entry) = ns.entry(&candidate) else {
                return Err(ListError::NotFound(segment.to_string()));
            };
            ns.check_contained(&candidate)?;

            let mime = self.classifier.classify(ns, &entry);
            if let Some(strategy) = self.containers.strategy_for(&mime) {
                debug!(segment, mime = %mime, ?strategy, "entering container");
                return self.expand(strategy, origin, ns, &candidate, remaining);
            }
            position = candidate;
        }

        match ns.kind_of(&position) {
            PathType::NotFound => Err(ListError::NotFound(display_origin(origin))),
            PathType::Directory => self.describe_children(origin, ns, &position),
            PathType::File | PathType::Other => {
                Err(ListError::NotExpandable(display_origin(origin)))
            }
        }
    }

    /// Open the container at `location` according to `strategy` and resume
    /// walking inside it. The opened namespace is dropped before returning,
    /// whatever the outcome.
    fn expand<'s>(
        &self,
        strategy: ContainerStrategy,
        origin: &str,
        ns: &dyn Namespace,
        location: &NsPath,
        remaining: &mut dyn Iterator<Item = &'s str>,
    ) -> Result<Vec<FileData>, ListError> {
        match strategy {
            ContainerStrategy::ZipFamily => {
                let host = ns.host_file(location).ok_or_else(|| {
                    ListError::UnsupportedContainer(format!(
                        "cannot open {} nested inside {}",
                        location,
                        ns.describe()
                    ))
                })?;
                let archive = ZipNamespace::open(&host)?;
                self.walk(origin, &archive, NsPath::root(), remaining)
            }
            ContainerStrategy::Unimplemented(family) => Err(ListError::UnsupportedContainer(format!(
                "{} archives are not supported yet: {}",
                family, location
            ))),
        }
    }

    fn describe_children(
        &self,
        origin: &str,
        ns: &dyn Namespace,
        position: &NsPath,
    ) -> Result<Vec<FileData>, ListError> {
        let children = ns.read_dir(position)?;
        Ok(children
            .into_iter()
            .map(|entry| {
                let file_type = self.classifier.classify(ns, &entry);
                let is_expandable =
                    file_type == DIRECTORY_TYPE || self.containers.is_container(&file_type);
                FileData {
                    path: logical_child(origin, &entry.name),
                    name: entry.name,
                    file_type,
                    is_expandable,
                }
            })
            .collect())
    }
}

fn display_origin(origin: &str) -> String {
    if origin.is_empty() {
        "/".to_string()
    } else {
        origin.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_op::error::ErrorKind;
    use assert_fs::prelude::*;

    #[test]
    fn lists_base_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.txt").write_str("1").unwrap();
        temp.child("sub").create_dir_all().unwrap();

        let provider = FileDataProvider::new(temp.path());
        let mut listing = provider.list::<&str>(&[]).unwrap();
        listing.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].path, "a.txt");
        assert_eq!(listing[0].file_type, "text/plain");
        assert!(!listing[0].is_expandable);
        assert_eq!(listing[1].path, "sub");
        assert_eq!(listing[1].file_type, DIRECTORY_TYPE);
        assert!(listing[1].is_expandable);
    }

    #[test]
    fn missing_base_is_not_found() {
        let temp = assert_fs::TempDir::new().unwrap();
        let provider = FileDataProvider::new(temp.path().join("gone"));
        let err = provider.list::<&str>(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn dot_segment_lists_current_position() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("sub/inner.txt").write_str("x").unwrap();

        let provider = FileDataProvider::new(temp.path());
        let listing = provider.list(&["sub", "."]).unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].path, "sub/./inner.txt");
    }

    #[test]
    fn parent_segment_escaping_base_is_invalid() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("sub").create_dir_all().unwrap();

        let provider = FileDataProvider::new(temp.path().join("sub"));
        let err = provider.list(&[".."]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
    }

    #[test]
    fn escaping_parent_is_invalid_even_when_target_is_missing() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("sub").create_dir_all().unwrap();

        let provider = FileDataProvider::new(temp.path().join("sub"));
        let err = provider.list(&["../does-not-exist"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPath);

        // Inside the base, a missing target is reported as such.
        let err = provider.list(&["x/../does-not-exist"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn empty_container_table_treats_archives_as_leaves() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.rar").write_str("not really").unwrap();

        let provider = FileDataProvider::with_parts(
            temp.path(),
            ContainerTable::empty(),
            TypeClassifier::default(),
        );
        let listing = provider.list::<&str>(&[]).unwrap();
        assert!(!listing[0].is_expandable);
        let err = provider.list(&["a.rar"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotExpandable);
    }

    #[test]
    fn provider_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileDataProvider>();
    }
}
