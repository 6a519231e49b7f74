//! Query sessions against Azure AI Search.
//!
//! A session is bound to exactly one index. The four query primitives all go
//! through the same documents-search endpoint; the two metadata primitives use
//! the service-level index API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::credential::ApiKeyCredential;
use crate::document::{IndexInfo, SearchDocument};
use crate::error::{QueryError, SessionError};

const API_VERSION: &str = "2024-07-01";
const API_KEY_HEADER: &str = "api-key";

/// Backend error bodies are embedded in user-visible messages; keep them short.
const MAX_ERROR_BODY: usize = 600;

/// Optional knobs shared by the text, vector, and hybrid primitives.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub limit: usize,
    pub output_fields: Option<Vec<String>>,
    pub filter_expr: Option<String>,
    pub semantic_configuration: Option<String>,
}

/// One authenticated connection scoped to a single index.
///
/// Implementations map every transport or backend failure to [`QueryError`];
/// no HTTP-client error type crosses this boundary. A single failed attempt is
/// a failed result — no retries happen at this layer.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Index this session is bound to.
    fn index_name(&self) -> &str;

    /// Full-text search; semantic ranking when `semantic_configuration` is set.
    async fn text_search(
        &self,
        query_text: &str,
        options: &QueryOptions,
    ) -> Result<Vec<SearchDocument>, QueryError>;

    /// Pure similarity search over `vector_field`; no text query is sent.
    async fn vector_search(
        &self,
        vector: &[f32],
        vector_field: &str,
        options: &QueryOptions,
    ) -> Result<Vec<SearchDocument>, QueryError>;

    /// Text and vector similarity combined in one backend call.
    async fn hybrid_search(
        &self,
        query_text: &str,
        vector: &[f32],
        vector_field: &str,
        options: &QueryOptions,
    ) -> Result<Vec<SearchDocument>, QueryError>;

    /// Wildcard query restricted by a filter expression.
    async fn filter_query(
        &self,
        filter_expr: &str,
        output_fields: Option<&[String]>,
        limit: usize,
    ) -> Result<Vec<SearchDocument>, QueryError>;

    /// Names of the indexes known to the service, minimally this session's own.
    async fn list_indexes(&self) -> Result<Vec<String>, QueryError>;

    /// Name and declared field names of one index.
    async fn index_info(&self, index_name: &str) -> Result<IndexInfo, QueryError>;
}

/// REST-backed [`SearchBackend`] implementation.
pub struct SearchSession {
    endpoint: String,
    credential: ApiKeyCredential,
    index_name: String,
    http: reqwest::Client,
}

impl SearchSession {
    /// Binds a session to `index_name`. The endpoint must be an http(s) URL;
    /// a trailing slash is tolerated.
    pub fn new(
        endpoint: &str,
        credential: ApiKeyCredential,
        index_name: &str,
        http: reqwest::Client,
    ) -> Result<Self, SessionError> {
        let endpoint = endpoint.trim_end_matches('/');
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(SessionError::InvalidEndpoint(endpoint.to_string()));
        }
        let index_name = index_name.trim();
        if index_name.is_empty() {
            return Err(SessionError::EmptyIndexName);
        }
        Ok(Self {
            endpoint: endpoint.to_string(),
            credential,
            index_name: index_name.to_string(),
            http,
        })
    }

    fn docs_search_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={API_VERSION}",
            self.endpoint, self.index_name
        )
    }

    async fn run_search(
        &self,
        operation: &'static str,
        payload: &SearchPayload<'_>,
    ) -> Result<Vec<SearchDocument>, QueryError> {
        let request = self.http.post(self.docs_search_url()).json(payload);
        let body = self.execute(operation, request).await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|err| QueryError::new(operation, format!("malformed backend response: {err}")))?;
        Ok(parsed.value)
    }

    async fn execute(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<String, QueryError> {
        let response = request
            .header(API_KEY_HEADER, self.credential.secret())
            .send()
            .await
            .map_err(|err| QueryError::new(operation, err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| QueryError::new(operation, err.to_string()))?;
        if !status.is_success() {
            return Err(QueryError::new(
                operation,
                format!("backend returned {status}: {}", truncate_body(&body, MAX_ERROR_BODY)),
            ));
        }
        Ok(body)
    }
}

#[async_trait]
impl SearchBackend for SearchSession {
    fn index_name(&self) -> &str {
        &self.index_name
    }

    async fn text_search(
        &self,
        query_text: &str,
        options: &QueryOptions,
    ) -> Result<Vec<SearchDocument>, QueryError> {
        log::debug!(
            "text-search '{query_text}' against '{}' (limit {})",
            self.index_name,
            options.limit
        );
        self.run_search("text-search", &SearchPayload::text(query_text, options))
            .await
    }

    async fn vector_search(
        &self,
        vector: &[f32],
        vector_field: &str,
        options: &QueryOptions,
    ) -> Result<Vec<SearchDocument>, QueryError> {
        log::debug!(
            "vector-search over '{vector_field}' against '{}' (limit {})",
            self.index_name,
            options.limit
        );
        self.run_search(
            "vector-search",
            &SearchPayload::vector(vector, vector_field, options),
        )
        .await
    }

    async fn hybrid_search(
        &self,
        query_text: &str,
        vector: &[f32],
        vector_field: &str,
        options: &QueryOptions,
    ) -> Result<Vec<SearchDocument>, QueryError> {
        log::debug!(
            "hybrid-search '{query_text}' over '{vector_field}' against '{}' (limit {})",
            self.index_name,
            options.limit
        );
        self.run_search(
            "hybrid-search",
            &SearchPayload::hybrid(query_text, vector, vector_field, options),
        )
        .await
    }

    async fn filter_query(
        &self,
        filter_expr: &str,
        output_fields: Option<&[String]>,
        limit: usize,
    ) -> Result<Vec<SearchDocument>, QueryError> {
        log::debug!(
            "filter query '{filter_expr}' against '{}' (limit {limit})",
            self.index_name
        );
        self.run_search(
            "query",
            &SearchPayload::filter_only(filter_expr, output_fields, limit),
        )
        .await
    }

    async fn list_indexes(&self) -> Result<Vec<String>, QueryError> {
        let operation = "list-indexes";
        let url = format!(
            "{}/indexes?api-version={API_VERSION}&$select=name",
            self.endpoint
        );
        let body = self.execute(operation, self.http.get(url)).await?;
        let parsed: IndexListResponse = serde_json::from_str(&body)
            .map_err(|err| QueryError::new(operation, format!("malformed backend response: {err}")))?;
        Ok(parsed.value.into_iter().map(|entry| entry.name).collect())
    }

    async fn index_info(&self, index_name: &str) -> Result<IndexInfo, QueryError> {
        let operation = "index-info";
        let url = format!(
            "{}/indexes/{}?api-version={API_VERSION}",
            self.endpoint,
            index_name.trim()
        );
        let body = self.execute(operation, self.http.get(url)).await?;
        let parsed: IndexDefinition = serde_json::from_str(&body)
            .map_err(|err| QueryError::new(operation, format!("malformed backend response: {err}")))?;
        Ok(IndexInfo {
            name: parsed.name,
            fields: parsed.fields.into_iter().map(|field| field.name).collect(),
        })
    }
}

// ============================================================================
// Wire payloads
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    top: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    select: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    semantic_configuration: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    vector_queries: Vec<VectorQuery<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VectorQuery<'a> {
    kind: &'static str,
    vector: &'a [f32],
    fields: &'a str,
    k: usize,
}

impl<'a> SearchPayload<'a> {
    fn base(options: &'a QueryOptions) -> Self {
        let semantic = options.semantic_configuration.as_deref();
        Self {
            search: None,
            top: options.limit,
            select: options.output_fields.as_deref().map(join_fields),
            filter: options.filter_expr.as_deref(),
            query_type: semantic.map(|_| "semantic"),
            semantic_configuration: semantic,
            vector_queries: Vec::new(),
        }
    }

    fn text(query_text: &'a str, options: &'a QueryOptions) -> Self {
        Self {
            search: Some(query_text),
            ..Self::base(options)
        }
    }

    fn vector(vector: &'a [f32], vector_field: &'a str, options: &'a QueryOptions) -> Self {
        Self {
            vector_queries: vec![VectorQuery {
                kind: "vector",
                vector,
                fields: vector_field,
                k: options.limit,
            }],
            ..Self::base(options)
        }
    }

    fn hybrid(
        query_text: &'a str,
        vector: &'a [f32],
        vector_field: &'a str,
        options: &'a QueryOptions,
    ) -> Self {
        Self {
            search: Some(query_text),
            ..Self::vector(vector, vector_field, options)
        }
    }

    fn filter_only(
        filter_expr: &'a str,
        output_fields: Option<&[String]>,
        limit: usize,
    ) -> Self {
        Self {
            search: Some("*"),
            top: limit,
            select: output_fields.map(join_fields),
            filter: Some(filter_expr),
            query_type: None,
            semantic_configuration: None,
            vector_queries: Vec::new(),
        }
    }
}

fn join_fields(fields: &[String]) -> String {
    fields.join(",")
}

fn truncate_body(body: &str, max_chars: usize) -> String {
    let mut out: String = body.chars().take(max_chars).collect();
    if out.len() < body.len() {
        out.push('…');
    }
    out
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Vec<SearchDocument>,
}

#[derive(Debug, Deserialize)]
struct IndexListResponse {
    #[serde(default)]
    value: Vec<IndexListEntry>,
}

#[derive(Debug, Deserialize)]
struct IndexListEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct IndexDefinition {
    name: String,
    #[serde(default)]
    fields: Vec<IndexFieldDefinition>,
}

#[derive(Debug, Deserialize)]
struct IndexFieldDefinition {
    name: String,
}
