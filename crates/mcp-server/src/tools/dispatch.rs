//! Tool dispatch for the Azure Search MCP server.
//!
//! Every handler follows the same shape: resolve the target session through
//! the registry, invoke the matching query primitive, and render the outcome
//! as a response envelope. Errors never propagate past this module as
//! anything other than an error envelope.

use std::sync::Arc;

use azure_search_client::{QueryOptions, SearchBackend, SearchDocument, SessionRegistry};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};

use super::catalog;
use super::envelope::{codes, error_envelope, results_envelope};
use super::router_guard::GuardedToolRouter;
use super::schemas::{
    FilterQueryRequest, HybridSearchRequest, IndexInfoRequest, ListIndexesRequest,
    TextSearchRequest, VectorSearchRequest,
};

/// Azure Search MCP service.
#[derive(Clone)]
pub struct AzureSearchService {
    registry: Arc<SessionRegistry>,
    tool_router: GuardedToolRouter<Self>,
}

impl AzureSearchService {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self {
            registry,
            tool_router: GuardedToolRouter::new(Self::tool_router()),
        }
    }

    /// The index named by the caller, or the configured default.
    fn effective_index(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.registry.default_index())
            .to_string()
    }

    async fn resolve_session(
        &self,
        operation: &'static str,
        index: &str,
    ) -> Result<Arc<dyn SearchBackend>, CallToolResult> {
        self.registry
            .resolve(index)
            .await
            .map_err(|err| error_envelope(codes::SESSION_CREATION, operation, &err.to_string()))
    }
}

#[tool_handler]
impl ServerHandler for AzureSearchService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(catalog::tool_instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

#[tool_router(vis = "pub(crate)")]
impl AzureSearchService {
    /// Full text search.
    #[tool(
        name = "text-search",
        description = "Search for documents using full text search in an Azure Search index"
    )]
    pub async fn text_search(
        &self,
        Parameters(request): Parameters<TextSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let operation = "text-search";
        let index = self.effective_index(request.index_name.as_deref());
        let session = match self.resolve_session(operation, &index).await {
            Ok(session) => session,
            Err(envelope) => return Ok(envelope),
        };

        let options = QueryOptions {
            limit: request.limit,
            output_fields: request.output_fields,
            filter_expr: request.filter_expr,
            semantic_configuration: request.semantic_configuration,
        };
        match session.text_search(&request.query_text, &options).await {
            Ok(records) => {
                let mut header = format!(
                    "Search results for '{}' in index '{index}'",
                    request.query_text
                );
                if let Some(filter) = options.filter_expr.as_deref() {
                    header.push_str(&format!(" (filter: '{filter}')"));
                }
                header.push(':');
                Ok(results_envelope(header, &records))
            }
            Err(err) => Ok(error_envelope(codes::BACKEND_QUERY, operation, &err.message)),
        }
    }

    /// List the indexes known to the search service.
    #[tool(
        name = "list-indexes",
        description = "List all indexes in the Azure Search service"
    )]
    pub async fn list_indexes(
        &self,
        Parameters(_request): Parameters<ListIndexesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let operation = "list-indexes";
        let session = match self
            .resolve_session(operation, self.registry.default_index())
            .await
        {
            Ok(session) => session,
            Err(envelope) => return Ok(envelope),
        };

        match session.list_indexes().await {
            Ok(names) => {
                let records: Vec<SearchDocument> = names
                    .into_iter()
                    .map(|name| {
                        let mut record = SearchDocument::new();
                        record.insert("name".to_string(), serde_json::Value::String(name));
                        record
                    })
                    .collect();
                Ok(results_envelope(
                    "Indexes in the search service:".to_string(),
                    &records,
                ))
            }
            Err(err) => Ok(error_envelope(codes::BACKEND_QUERY, operation, &err.message)),
        }
    }

    /// Describe one index.
    #[tool(
        name = "index-info",
        description = "Get detailed information about an Azure Search index"
    )]
    pub async fn index_info(
        &self,
        Parameters(request): Parameters<IndexInfoRequest>,
    ) -> Result<CallToolResult, McpError> {
        let operation = "index-info";
        let session = match self
            .resolve_session(operation, self.registry.default_index())
            .await
        {
            Ok(session) => session,
            Err(envelope) => return Ok(envelope),
        };

        match session.index_info(&request.index_name).await {
            Ok(info) => {
                let record = match serde_json::to_value(&info) {
                    Ok(serde_json::Value::Object(map)) => map,
                    _ => SearchDocument::new(),
                };
                Ok(results_envelope(
                    format!("Index info for '{}':", request.index_name),
                    &[record],
                ))
            }
            Err(err) => Ok(error_envelope(codes::BACKEND_QUERY, operation, &err.message)),
        }
    }

    /// Filter-expression query.
    #[tool(
        name = "query",
        description = "Query an Azure Search index using filter expressions"
    )]
    pub async fn filter_query(
        &self,
        Parameters(request): Parameters<FilterQueryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let operation = "query";
        let index = self.effective_index(request.index_name.as_deref());
        let session = match self.resolve_session(operation, &index).await {
            Ok(session) => session,
            Err(envelope) => return Ok(envelope),
        };

        match session
            .filter_query(
                &request.filter_expr,
                request.output_fields.as_deref(),
                request.limit,
            )
            .await
        {
            Ok(records) => Ok(results_envelope(
                format!(
                    "Query results for '{}' in index '{index}':",
                    request.filter_expr
                ),
                &records,
            )),
            Err(err) => Ok(error_envelope(codes::BACKEND_QUERY, operation, &err.message)),
        }
    }

    /// Vector similarity search.
    #[tool(
        name = "vector-search",
        description = "Perform vector similarity search on an Azure Search index"
    )]
    pub async fn vector_search(
        &self,
        Parameters(request): Parameters<VectorSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let operation = "vector-search";
        let index = self.effective_index(request.index_name.as_deref());
        let session = match self.resolve_session(operation, &index).await {
            Ok(session) => session,
            Err(envelope) => return Ok(envelope),
        };

        let options = QueryOptions {
            limit: request.limit,
            output_fields: request.output_fields,
            filter_expr: request.filter_expr,
            semantic_configuration: request.semantic_configuration,
        };
        match session
            .vector_search(&request.vector, &request.vector_field, &options)
            .await
        {
            // The header names the index only; raw vectors stay out of it.
            Ok(records) => Ok(results_envelope(
                format!("Vector search results in index '{index}':"),
                &records,
            )),
            Err(err) => Ok(error_envelope(codes::BACKEND_QUERY, operation, &err.message)),
        }
    }

    /// Combined text and vector search.
    #[tool(
        name = "hybrid-search",
        description = "Perform hybrid search combining text and vector similarity on an Azure Search index"
    )]
    pub async fn hybrid_search(
        &self,
        Parameters(request): Parameters<HybridSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let operation = "hybrid-search";
        let index = self.effective_index(request.index_name.as_deref());
        let session = match self.resolve_session(operation, &index).await {
            Ok(session) => session,
            Err(envelope) => return Ok(envelope),
        };

        let options = QueryOptions {
            limit: request.limit,
            output_fields: request.output_fields,
            filter_expr: request.filter_expr,
            semantic_configuration: request.semantic_configuration,
        };
        match session
            .hybrid_search(
                &request.query_text,
                &request.vector,
                &request.vector_field,
                &options,
            )
            .await
        {
            Ok(records) => Ok(results_envelope(
                format!(
                    "Hybrid search results for '{}' in index '{index}':",
                    request.query_text
                ),
                &records,
            )),
            Err(err) => Ok(error_envelope(codes::BACKEND_QUERY, operation, &err.message)),
        }
    }
}
