// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (filter composition, record shaping) lives in the domains
// and talks to the store through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseDocumentStore)

use async_trait::async_trait;

use super::error::StoreResult;
use super::query::{Document, FieldCount, Filter};

// =============================================================================
// Document Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseDocumentStore: Send + Sync {
    /// Insert a document and return the store-assigned identifier as a string
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<String>;

    /// Return up to `limit` documents matching `filter`, in store default order.
    /// Returned documents still carry the internal identifier field.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> StoreResult<Vec<Document>>;

    /// Group every document by `field` and count each group.
    /// Groups are sorted by key ascending.
    async fn count_by_field(&self, collection: &str, field: &str) -> StoreResult<Vec<FieldCount>>;

    /// Names of the collections in the database
    async fn list_collection_names(&self) -> StoreResult<Vec<String>>;

    /// Release the underlying client. Called once at shutdown.
    async fn close(&self) {}
}
