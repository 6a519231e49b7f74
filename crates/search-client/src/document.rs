use serde::{Deserialize, Serialize};

/// One record returned by the backend.
///
/// Records are opaque field maps: the backend's schema is not mirrored here,
/// and `@search.*` metadata keys pass through untouched.
pub type SearchDocument = serde_json::Map<String, serde_json::Value>;

/// Descriptor for one index: its name and declared field names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexInfo {
    pub name: String,
    pub fields: Vec<String>,
}
