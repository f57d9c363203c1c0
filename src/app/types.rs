use serde::{Deserialize, Serialize};

/// One child of a listed location, as handed to adapters.
///
/// Serialized as `{ "path", "name", "type", "isExpandable" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    /// Logical path built from the requested segments plus `name`.
    pub path: String,
    pub name: String,
    /// `"directory"`, a MIME type, or `"<unknown_type>"`.
    #[serde(rename = "type")]
    pub file_type: String,
    pub is_expandable: bool,
}
