use clap::Parser;

/// Process configuration.
///
/// All three values are required; a missing one is a fatal startup error
/// reported before the server accepts any request.
#[derive(Debug, Parser)]
#[command(
    name = "azure-search-mcp",
    version,
    about = "MCP server exposing Azure AI Search query tools"
)]
pub struct ServerConfig {
    /// Azure Search service endpoint, e.g. https://myservice.search.windows.net
    #[arg(long, env = "AZURE_SEARCH_ENDPOINT")]
    pub endpoint: String,

    /// API key for the search service
    #[arg(long, env = "AZURE_SEARCH_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Default index used when a call does not name one
    #[arg(long, env = "AZURE_SEARCH_INDEX_NAME")]
    pub index_name: String,
}
