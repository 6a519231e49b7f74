//! Azure Search MCP tool surface.
//!
//! Split into submodules to keep the catalog, input schemas, envelopes, and
//! dispatch individually reviewable.

pub(crate) mod catalog;
mod dispatch;
mod envelope;
mod router_guard;
mod schemas;


pub use dispatch::AzureSearchService;
