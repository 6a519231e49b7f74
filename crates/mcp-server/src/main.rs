//! Azure Search MCP Server
//!
//! Exposes Azure AI Search query operations to AI agents via the MCP protocol.
//!
//! ## Tools
//!
//! - `text-search` - Full text search over an index
//! - `vector-search` - Vector similarity search
//! - `hybrid-search` - Combined text + vector search
//! - `query` - Filter-expression query
//! - `list-indexes` - List indexes in the search service
//! - `index-info` - Describe one index
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "azure-search": {
//!       "command": "azure-search-mcp",
//!       "env": {
//!         "AZURE_SEARCH_ENDPOINT": "https://myservice.search.windows.net",
//!         "AZURE_SEARCH_API_KEY": "...",
//!         "AZURE_SEARCH_INDEX_NAME": "my-index"
//!       }
//!     }
//!   }
//! }
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

use azure_search_client::{ApiKeyCredential, RestSessionFactory, SessionRegistry};

mod config;
mod tools;

use config::ServerConfig;
use tools::AzureSearchService;

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ServerConfig::parse();

    let credential =
        ApiKeyCredential::acquire(config.api_key).context("invalid search API key")?;
    let factory = RestSessionFactory::new(&config.endpoint, credential)
        .context("invalid search endpoint")?;
    let registry = SessionRegistry::new(&config.index_name, Arc::new(factory))
        .with_context(|| format!("failed to prepare default index '{}'", config.index_name))?;

    log::info!(
        "Starting Azure Search MCP server (endpoint: {}, default index: {})",
        config.endpoint,
        registry.default_index()
    );

    let service = AzureSearchService::new(Arc::new(registry));
    let server = service.serve(stdio()).await?;

    // Wait for shutdown
    server.waiting().await?;

    log::info!("Azure Search MCP server stopped");
    Ok(())
}
