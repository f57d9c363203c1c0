use std::collections::HashMap;

/// How a recognised container type is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStrategy {
    /// Mount the file as a zip archive and keep walking inside it.
    ZipFamily,
    /// Recognised and advertised as expandable, but expansion is not
    /// implemented. Carries the family name for error messages.
    Unimplemented(&'static str),
}

const ZIP_TYPES: &[&str] = &[
    "application/zip",
    "application/x-zip-compressed",
    "application/java-archive",
    "application/x-java-archive",
];

// TODO: mount RAR archives once a reader crate is picked; until then these
// types stay registered so they are still reported as expandable.
const RAR_TYPES: &[&str] = &[
    "application/x-rar",
    "application/x-rar-compressed",
    "application/vnd.rar",
];

/// Mapping from MIME type to the strategy that expands it.
#[derive(Debug, Clone)]
pub struct ContainerTable {
    strategies: HashMap<String, ContainerStrategy>,
}

impl Default for ContainerTable {
    fn default() -> Self {
        let mut table = ContainerTable::empty();
        for mime in ZIP_TYPES {
            table.register(*mime, ContainerStrategy::ZipFamily);
        }
        for mime in RAR_TYPES {
            table.register(*mime, ContainerStrategy::Unimplemented("RAR"));
        }
        table
    }
}

impl ContainerTable {
    /// A table with no container types; everything but directories is a leaf.
    pub fn empty() -> Self {
        ContainerTable {
            strategies: HashMap::new(),
        }
    }

    /// Register (or replace) the strategy for `mime`.
    pub fn register(&mut self, mime: impl Into<String>, strategy: ContainerStrategy) -> &mut Self {
        self.strategies.insert(mime.into(), strategy);
        self
    }

    pub fn strategy_for(&self, mime: &str) -> Option<ContainerStrategy> {
        self.strategies.get(mime).copied()
    }

    /// Whether `mime` is a registered container type. This says nothing about
    /// whether expanding it can currently succeed.
    pub fn is_container(&self, mime: &str) -> bool {
        self.strategies.contains_key(mime)
    }
}
