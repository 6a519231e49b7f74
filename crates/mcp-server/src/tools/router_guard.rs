//! Router wrapper turning routing failures into error envelopes.
//!
//! The transport layer must only ever see well-formed tool results: an unknown
//! operation or an argument bag that fails validation is answered with an
//! error envelope, not a protocol-level error.

use rmcp::handler::server::tool::{ToolCallContext, ToolRouter};
use rmcp::model::{CallToolResult, ErrorCode, Tool};
use rmcp::ErrorData;

use super::dispatch::AzureSearchService;
use super::envelope::{codes, error_envelope};

#[derive(Clone)]
pub(super) struct GuardedToolRouter<S> {
    inner: ToolRouter<S>,
}

impl<S> GuardedToolRouter<S>
where
    S: Send + Sync + 'static,
{
    pub(super) fn new(inner: ToolRouter<S>) -> Self {
        Self { inner }
    }

    pub(super) fn list_all(&self) -> Vec<Tool> {
        self.inner.list_all()
    }
}

impl GuardedToolRouter<AzureSearchService> {
    pub(super) async fn call(
        &self,
        context: ToolCallContext<'_, AzureSearchService>,
    ) -> Result<CallToolResult, ErrorData> {
        let tool_name = context.name.to_string();
        if self.inner.map.get(tool_name.as_str()).is_none() {
            return Ok(error_envelope(
                codes::UNKNOWN_OPERATION,
                &tool_name,
                "not a supported operation",
            ));
        }

        match self.inner.call(context).await {
            Ok(result) => Ok(result),
            Err(err) if err.code == ErrorCode::INVALID_PARAMS => {
                Ok(invalid_arguments_envelope(&tool_name, err.message.as_ref()))
            }
            Err(err) => Err(err),
        }
    }
}

/// Renders a deserialization failure, naming the offending field when the
/// message carries one.
pub(super) fn invalid_arguments_envelope(tool_name: &str, message: &str) -> CallToolResult {
    let detail = match extract_serde_field(message, "missing field `") {
        Some(field) => format!("missing required field `{field}`"),
        None => message.to_string(),
    };
    error_envelope(codes::INVALID_ARGUMENTS, tool_name, &detail)
}

fn extract_serde_field(message: &str, prefix: &str) -> Option<String> {
    let start = message.find(prefix)? + prefix.len();
    let rest = &message[start..];
    let end = rest.find('`')?;
    let field = rest[..end].trim();
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}
