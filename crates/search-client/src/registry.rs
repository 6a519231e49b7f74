//! Lazily-populated cache of one session per index.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::credential::ApiKeyCredential;
use crate::error::SessionError;
use crate::session::{SearchBackend, SearchSession};

/// Constructor seam between the registry and concrete sessions.
pub trait SessionFactory: Send + Sync {
    fn create(&self, index_name: &str) -> Result<Arc<dyn SearchBackend>, SessionError>;
}

/// Builds REST sessions sharing one endpoint, credential, and HTTP client.
pub struct RestSessionFactory {
    endpoint: String,
    credential: ApiKeyCredential,
    http: reqwest::Client,
}

impl RestSessionFactory {
    pub fn new(endpoint: &str, credential: ApiKeyCredential) -> Result<Self, SessionError> {
        let endpoint = endpoint.trim_end_matches('/');
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(SessionError::InvalidEndpoint(endpoint.to_string()));
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| SessionError::Creation {
                index: String::new(),
                message: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            credential,
            http,
        })
    }
}

impl SessionFactory for RestSessionFactory {
    fn create(&self, index_name: &str) -> Result<Arc<dyn SearchBackend>, SessionError> {
        let session = SearchSession::new(
            &self.endpoint,
            self.credential.clone(),
            index_name,
            self.http.clone(),
        )?;
        Ok(Arc::new(session))
    }
}

type SessionHandle = Arc<Mutex<SessionSlot>>;

#[derive(Default)]
struct SessionSlot {
    session: Option<Arc<dyn SearchBackend>>,
}

/// Index name → session map. The configured default index's session is
/// pre-created; every other session is constructed on first resolution and
/// cached for the rest of the process lifetime. No eviction.
pub struct SessionRegistry {
    default_index: String,
    default_session: Arc<dyn SearchBackend>,
    factory: Arc<dyn SessionFactory>,
    slots: Mutex<HashMap<String, SessionHandle>>,
}

impl SessionRegistry {
    /// Pre-creates the default index's session; a failure here is a startup
    /// failure.
    pub fn new(
        default_index: &str,
        factory: Arc<dyn SessionFactory>,
    ) -> Result<Self, SessionError> {
        let default_index = default_index.trim();
        if default_index.is_empty() {
            return Err(SessionError::EmptyIndexName);
        }
        let default_session = factory.create(default_index)?;
        Ok(Self {
            default_index: default_index.to_string(),
            default_session,
            factory,
            slots: Mutex::new(HashMap::new()),
        })
    }

    pub fn default_index(&self) -> &str {
        &self.default_index
    }

    /// Returns the session for `index_name`, constructing and caching it on
    /// first sight.
    ///
    /// Resolution of the same unseen index serializes on that index's slot, so
    /// concurrent first resolutions construct exactly one session. A
    /// construction failure leaves the slot empty; the next resolve retries.
    pub async fn resolve(
        &self,
        index_name: &str,
    ) -> Result<Arc<dyn SearchBackend>, SessionError> {
        let index_name = index_name.trim();
        if index_name.is_empty() {
            return Err(SessionError::EmptyIndexName);
        }
        if index_name == self.default_index {
            return Ok(self.default_session.clone());
        }

        let handle = self.session_handle(index_name).await;
        let mut slot = handle.lock().await;
        if let Some(session) = slot.session.as_ref() {
            return Ok(session.clone());
        }

        log::info!("creating search session for index '{index_name}'");
        let session = self.factory.create(index_name)?;
        slot.session = Some(session.clone());
        Ok(session)
    }

    async fn session_handle(&self, index_name: &str) -> SessionHandle {
        let mut slots = self.slots.lock().await;
        slots
            .entry(index_name.to_string())
            .or_default()
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{IndexInfo, SearchDocument};
    use crate::error::QueryError;
    use crate::session::QueryOptions;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubBackend {
        index: String,
    }

    #[async_trait]
    impl SearchBackend for StubBackend {
        fn index_name(&self) -> &str {
            &self.index
        }

        async fn text_search(
            &self,
            _query_text: &str,
            _options: &QueryOptions,
        ) -> Result<Vec<SearchDocument>, QueryError> {
            Ok(Vec::new())
        }

        async fn vector_search(
            &self,
            _vector: &[f32],
            _vector_field: &str,
            _options: &QueryOptions,
        ) -> Result<Vec<SearchDocument>, QueryError> {
            Ok(Vec::new())
        }

        async fn hybrid_search(
            &self,
            _query_text: &str,
            _vector: &[f32],
            _vector_field: &str,
            _options: &QueryOptions,
        ) -> Result<Vec<SearchDocument>, QueryError> {
            Ok(Vec::new())
        }

        async fn filter_query(
            &self,
            _filter_expr: &str,
            _output_fields: Option<&[String]>,
            _limit: usize,
        ) -> Result<Vec<SearchDocument>, QueryError> {
            Ok(Vec::new())
        }

        async fn list_indexes(&self) -> Result<Vec<String>, QueryError> {
            Ok(vec![self.index.clone()])
        }

        async fn index_info(&self, index_name: &str) -> Result<IndexInfo, QueryError> {
            Ok(IndexInfo {
                name: index_name.to_string(),
                fields: Vec::new(),
            })
        }
    }

    struct CountingFactory {
        created: AtomicUsize,
        fail_for: Option<String>,
    }

    impl CountingFactory {
        fn new() -> Self {
            Self {
                created: AtomicUsize::new(0),
                fail_for: None,
            }
        }

        fn failing_for(index: &str) -> Self {
            Self {
                created: AtomicUsize::new(0),
                fail_for: Some(index.to_string()),
            }
        }

        fn created(&self) -> usize {
            self.created.load(Ordering::SeqCst)
        }
    }

    impl SessionFactory for CountingFactory {
        fn create(&self, index_name: &str) -> Result<Arc<dyn SearchBackend>, SessionError> {
            if self.fail_for.as_deref() == Some(index_name) {
                return Err(SessionError::Creation {
                    index: index_name.to_string(),
                    message: "forbidden".to_string(),
                });
            }
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(StubBackend {
                index: index_name.to_string(),
            }))
        }
    }

    #[tokio::test]
    async fn default_index_resolves_to_the_precreated_session() {
        let factory = Arc::new(CountingFactory::new());
        let registry = SessionRegistry::new("docs", factory.clone()).unwrap();
        assert_eq!(factory.created(), 1);

        let first = registry.resolve("docs").await.unwrap();
        let second = registry.resolve("docs").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.created(), 1, "default resolution must not construct");
    }

    #[tokio::test]
    async fn unseen_index_is_constructed_once_and_cached() {
        let factory = Arc::new(CountingFactory::new());
        let registry = SessionRegistry::new("docs", factory.clone()).unwrap();

        let first = registry.resolve("other-index").await.unwrap();
        let second = registry.resolve("other-index").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.index_name(), "other-index");
        assert_eq!(factory.created(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_resolutions_construct_exactly_one_session() {
        let factory = Arc::new(CountingFactory::new());
        let registry = Arc::new(SessionRegistry::new("docs", factory.clone()).unwrap());

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let registry = registry.clone();
            tasks.push(tokio::spawn(async move {
                registry.resolve("fresh-index").await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(factory.created(), 2, "default plus exactly one for 'fresh-index'");
    }

    #[tokio::test]
    async fn blank_index_names_are_rejected_without_construction() {
        let factory = Arc::new(CountingFactory::new());
        let registry = SessionRegistry::new("docs", factory.clone()).unwrap();

        assert!(matches!(
            registry.resolve("   ").await,
            Err(SessionError::EmptyIndexName)
        ));
        assert_eq!(factory.created(), 1);
    }

    #[tokio::test]
    async fn failed_construction_leaves_no_cached_entry() {
        let factory = Arc::new(CountingFactory::failing_for("bad-index"));
        let registry = SessionRegistry::new("docs", factory.clone()).unwrap();

        assert!(registry.resolve("bad-index").await.is_err());
        // The failure is not cached: the factory is consulted again.
        assert!(registry.resolve("bad-index").await.is_err());
        assert!(registry.resolve("docs").await.is_ok());
    }

    #[tokio::test]
    async fn registry_requires_a_default_index() {
        let factory = Arc::new(CountingFactory::new());
        assert!(matches!(
            SessionRegistry::new("  ", factory),
            Err(SessionError::EmptyIndexName)
        ));
    }
}
