//! Client sessions for Azure AI Search.
//!
//! One [`SearchSession`] is bound to one index and exposes the four query
//! primitives (text, vector, hybrid, filter) plus index metadata lookups.
//! [`SessionRegistry`] caches sessions per index, creating them lazily through
//! a [`SessionFactory`].

mod credential;
mod document;
mod error;
mod registry;
mod session;

pub use credential::ApiKeyCredential;
pub use document::{IndexInfo, SearchDocument};
pub use error::{AuthError, QueryError, SessionError};
pub use registry::{RestSessionFactory, SessionFactory, SessionRegistry};
pub use session::{QueryOptions, SearchBackend, SearchSession};
