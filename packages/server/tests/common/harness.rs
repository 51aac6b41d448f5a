//! Test harness for integration testing.
//!
//! Each test gets a fresh router over its own in-memory document store, so
//! tests never see each other's records.

use std::sync::Arc;

use laptop_core::kernel::{BaseDocumentStore, InMemoryDocumentStore, UnavailableDocumentStore};
use laptop_core::server::{build_app, AppState};
use laptop_core::Config;
use test_context::AsyncTestContext;

use super::ApiClient;

/// Configuration matching a fully configured deployment.
pub fn test_config() -> Config {
    Config {
        database_url: Some("mongodb://localhost:27017".to_string()),
        database_name: Some("laptop_store_test".to_string()),
        port: 0,
    }
}

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test harness backed by an in-memory store.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let response = ctx.client().get("/api/laptops").await;
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Store behind the router - use this for fixtures.
    pub store: Arc<InMemoryDocumentStore>,
    client: ApiClient,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }

    async fn teardown(self) {
        // Store is dropped with the harness
    }
}

impl TestHarness {
    pub fn new() -> Self {
        init_tracing();
        let store = Arc::new(InMemoryDocumentStore::new());
        let shared: Arc<dyn BaseDocumentStore> = store.clone();
        let client = ApiClient::new(build_app(AppState::new(Some(shared), test_config())));

        Self { store, client }
    }

    pub fn client(&self) -> ApiClient {
        self.client.clone()
    }
}

/// Test harness whose store fails every operation.
pub struct OutageHarness {
    client: ApiClient,
}

impl AsyncTestContext for OutageHarness {
    async fn setup() -> Self {
        init_tracing();
        let store: Arc<dyn BaseDocumentStore> = Arc::new(UnavailableDocumentStore::default());
        Self {
            client: ApiClient::new(build_app(AppState::new(Some(store), test_config()))),
        }
    }

    async fn teardown(self) {}
}

impl OutageHarness {
    pub fn client(&self) -> ApiClient {
        self.client.clone()
    }
}

/// Client for a deployment with no database configured.
pub fn unconfigured_client() -> ApiClient {
    init_tracing();
    let config = Config {
        database_url: None,
        database_name: None,
        port: 0,
    };
    ApiClient::new(build_app(AppState::new(None, config)))
}
