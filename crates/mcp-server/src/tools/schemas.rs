//! Tool input schemas.
//!
//! Each operation's arguments deserialize into one of these structs before any
//! backend call; that deserialization is the validation pass. Unknown fields
//! are ignored for forward compatibility. `limit` defaults are declared here
//! so they show up in the advertised schemas.

use rmcp::schemars;
use serde::Deserialize;

pub(crate) fn default_search_limit() -> usize {
    5
}

pub(crate) fn default_query_limit() -> usize {
    10
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TextSearchRequest {
    /// Text to search for
    #[schemars(description = "Text to search for")]
    pub query_text: String,

    /// Index to search (defaults to the configured index)
    #[schemars(description = "Name of the index to search (optional, uses default if not specified)")]
    pub index_name: Option<String>,

    /// Maximum number of results (default: 5)
    #[serde(default = "default_search_limit")]
    #[schemars(description = "Maximum number of results to return")]
    pub limit: usize,

    /// Fields to include in results
    #[schemars(description = "Fields to include in results")]
    pub output_fields: Option<Vec<String>>,

    /// Optional filter expression
    #[schemars(description = "Optional filter expression")]
    pub filter_expr: Option<String>,

    /// Semantic configuration name enabling semantic ranking
    #[schemars(description = "Optional semantic configuration name to enable semantic search")]
    pub semantic_configuration: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListIndexesRequest {}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IndexInfoRequest {
    /// Name of the index
    #[schemars(description = "Name of the index")]
    pub index_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FilterQueryRequest {
    /// Filter expression (e.g. `category eq 'documentation'`)
    #[schemars(description = "Filter expression (e.g. 'category eq \\'documentation\\'')")]
    pub filter_expr: String,

    /// Index to query (defaults to the configured index)
    #[schemars(description = "Name of the index to query (optional, uses default if not specified)")]
    pub index_name: Option<String>,

    /// Fields to include in results
    #[schemars(description = "Fields to include in results")]
    pub output_fields: Option<Vec<String>>,

    /// Maximum number of results (default: 10)
    #[serde(default = "default_query_limit")]
    #[schemars(description = "Maximum number of results")]
    pub limit: usize,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct VectorSearchRequest {
    /// Query vector
    #[schemars(description = "Query vector")]
    pub vector: Vec<f32>,

    /// Field containing vectors to search
    #[schemars(description = "Field containing vectors to search")]
    pub vector_field: String,

    /// Index to search (defaults to the configured index)
    #[schemars(description = "Name of the index to search (optional, uses default if not specified)")]
    pub index_name: Option<String>,

    /// Maximum number of results (default: 5)
    #[serde(default = "default_search_limit")]
    #[schemars(description = "Maximum number of results")]
    pub limit: usize,

    /// Fields to include in results
    #[schemars(description = "Fields to include in results")]
    pub output_fields: Option<Vec<String>>,

    /// Optional filter expression
    #[schemars(description = "Optional filter expression")]
    pub filter_expr: Option<String>,

    /// Semantic configuration name enabling semantic ranking
    #[schemars(description = "Optional semantic configuration name to enable semantic search")]
    pub semantic_configuration: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HybridSearchRequest {
    /// Text to search for
    #[schemars(description = "Text to search for")]
    pub query_text: String,

    /// Query vector
    #[schemars(description = "Query vector")]
    pub vector: Vec<f32>,

    /// Field containing vectors to search
    #[schemars(description = "Field containing vectors to search")]
    pub vector_field: String,

    /// Index to search (defaults to the configured index)
    #[schemars(description = "Name of the index to search (optional, uses default if not specified)")]
    pub index_name: Option<String>,

    /// Maximum number of results (default: 5)
    #[serde(default = "default_search_limit")]
    #[schemars(description = "Maximum number of results")]
    pub limit: usize,

    /// Fields to include in results
    #[schemars(description = "Fields to include in results")]
    pub output_fields: Option<Vec<String>>,

    /// Optional filter expression
    #[schemars(description = "Optional filter expression")]
    pub filter_expr: Option<String>,

    /// Semantic configuration name enabling semantic ranking
    #[schemars(description = "Optional semantic configuration name to enable semantic search")]
    pub semantic_configuration: Option<String>,
}
