// TestDependencies - in-process document stores for testing
//
// Provides store implementations that can be injected into the app state
// instead of MongoDB.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::{StoreError, StoreResult};
use super::query::{Document, FieldCount, Filter, INTERNAL_ID_FIELD};
use super::traits::BaseDocumentStore;

// =============================================================================
// In-Memory Document Store
// =============================================================================

/// Document store that keeps collections in memory.
///
/// Documents are returned in insertion order and receive a UUID v4 string
/// as their internal identifier.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert raw documents as-is, bypassing validation.
    /// Documents without an identifier get one.
    pub async fn seed(&self, collection: &str, documents: Vec<Document>) {
        let mut collections = self.collections.write().await;
        let entries = collections.entry(collection.to_string()).or_default();
        for mut document in documents {
            document
                .entry(INTERNAL_ID_FIELD)
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            entries.push(document);
        }
    }

    /// Number of documents stored in `collection`
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

/// Sort rank of a grouping key: null, then numbers, then strings, then the rest.
fn key_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        _ => 3,
    }
}

fn compare_keys(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => key_rank(a).cmp(&key_rank(b)),
    }
}

#[async_trait]
impl BaseDocumentStore for InMemoryDocumentStore {
    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        document.insert(INTERNAL_ID_FIELD.to_string(), Value::String(id.clone()));

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> StoreResult<Vec<Document>> {
        let compiled = filter
            .compile()
            .map_err(|e| StoreError::Backend(format!("invalid filter pattern: {e}")))?;

        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|document| compiled.matches(document))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_by_field(&self, collection: &str, field: &str) -> StoreResult<Vec<FieldCount>> {
        let collections = self.collections.read().await;
        let mut groups: Vec<FieldCount> = Vec::new();

        for document in collections.get(collection).into_iter().flatten() {
            let key = document.get(field).cloned().unwrap_or(Value::Null);
            match groups.iter_mut().find(|group| group.key == key) {
                Some(group) => group.count += 1,
                None => groups.push(FieldCount { key, count: 1 }),
            }
        }

        groups.sort_by(|a, b| compare_keys(&a.key, &b.key));
        Ok(groups)
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self.collections.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Unavailable Document Store
// =============================================================================

/// Document store whose every operation fails, simulating an outage.
pub struct UnavailableDocumentStore {
    message: String,
}

impl UnavailableDocumentStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> StoreError {
        StoreError::Backend(self.message.clone())
    }
}

impl Default for UnavailableDocumentStore {
    fn default() -> Self {
        Self::new("connection refused: server selection timeout")
    }
}

#[async_trait]
impl BaseDocumentStore for UnavailableDocumentStore {
    async fn insert_one(&self, _collection: &str, _document: Document) -> StoreResult<String> {
        Err(self.error())
    }

    async fn find(
        &self,
        _collection: &str,
        _filter: &Filter,
        _limit: u32,
    ) -> StoreResult<Vec<Document>> {
        Err(self.error())
    }

    async fn count_by_field(&self, _collection: &str, _field: &str) -> StoreResult<Vec<FieldCount>> {
        Err(self.error())
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        Err(self.error())
    }
}
