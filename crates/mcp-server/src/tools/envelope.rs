//! Response envelopes.
//!
//! A successful call renders one header block followed by one `<r>`-wrapped
//! block per record, so callers can split the header from the records
//! mechanically. A failed call renders a single error block.

use azure_search_client::SearchDocument;
use rmcp::model::{CallToolResult, Content};

pub(crate) mod codes {
    pub(crate) const UNKNOWN_OPERATION: &str = "unknown_operation";
    pub(crate) const INVALID_ARGUMENTS: &str = "invalid_arguments";
    pub(crate) const SESSION_CREATION: &str = "session_creation";
    pub(crate) const BACKEND_QUERY: &str = "backend_query";
}

pub(crate) fn results_envelope(header: String, records: &[SearchDocument]) -> CallToolResult {
    let mut content = Vec::with_capacity(records.len() + 1);
    content.push(Content::text(header));
    for record in records {
        content.push(Content::text(wrap_record(record)));
    }
    CallToolResult::success(content)
}

pub(crate) fn error_envelope(code: &str, operation: &str, message: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!(
        "error: {code}: {operation}: {message}"
    ))])
}

fn wrap_record(record: &SearchDocument) -> String {
    // Map keys are strings, so serialization cannot realistically fail; an
    // empty object keeps the envelope well-formed if it somehow does.
    let rendered = serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string());
    format!("<r>\n{rendered}\n</r>")
}
