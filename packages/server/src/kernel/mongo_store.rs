//! MongoDB-backed document store.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document as BsonDocument};
use mongodb::{Client, Collection, Database};
use serde_json::Value;

use super::error::{StoreError, StoreResult};
use super::query::{Condition, Document, FieldCount, Filter};
use super::traits::BaseDocumentStore;

/// Document store over a single MongoDB database.
///
/// The client is created once at startup and shared across requests; the
/// driver pools connections internally.
#[derive(Clone, Debug)]
pub struct MongoDocumentStore {
    client: Client,
    database: Database,
}

impl MongoDocumentStore {
    /// Create a client for `url` and bind it to `database_name`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here.
    pub async fn connect(url: &str, database_name: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(url).await?;
        let database = client.database(database_name);
        tracing::info!(database = database_name, "MongoDB client created");
        Ok(Self { client, database })
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.database.collection::<BsonDocument>(name)
    }
}

/// Translate a [`Filter`] into a MongoDB query document.
pub fn filter_to_bson(filter: &Filter) -> BsonDocument {
    let mut query = BsonDocument::new();
    for (field, condition) in filter.clauses() {
        let clause = match condition {
            Condition::Pattern {
                pattern,
                case_insensitive,
            } => {
                let options = if *case_insensitive { "i" } else { "" };
                doc! { "$regex": pattern.as_str(), "$options": options }
            }
            Condition::Range { gte, lte } => {
                let mut bounds = BsonDocument::new();
                if let Some(min) = gte {
                    bounds.insert("$gte", *min);
                }
                if let Some(max) = lte {
                    bounds.insert("$lte", *max);
                }
                bounds
            }
        };
        query.insert(field.as_str(), clause);
    }
    query
}

/// Aggregation pipeline grouping a collection by `field` and counting members.
pub fn group_count_pipeline(field: &str) -> Vec<BsonDocument> {
    let group_key = format!("${field}");
    vec![
        doc! { "$group": { "_id": group_key, "count": { "$sum": 1 } } },
        doc! { "$sort": { "_id": 1 } },
    ]
}

fn to_json_document(document: BsonDocument) -> Document {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

fn bson_count(value: Option<&Bson>) -> u64 {
    match value {
        Some(Bson::Int32(n)) => u64::try_from(*n).unwrap_or(0),
        Some(Bson::Int64(n)) => u64::try_from(*n).unwrap_or(0),
        Some(Bson::Double(n)) if *n >= 0.0 => *n as u64,
        _ => 0,
    }
}

#[async_trait]
impl BaseDocumentStore for MongoDocumentStore {
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<String> {
        let document = bson::to_document(&document)?;
        let result = self.collection(collection).insert_one(document).await?;

        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => s,
            other => other.to_string(),
        };
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> StoreResult<Vec<Document>> {
        let cursor = self
            .collection(collection)
            .find(filter_to_bson(filter))
            .limit(i64::from(limit))
            .await?;
        let documents: Vec<BsonDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(to_json_document).collect())
    }

    async fn count_by_field(&self, collection: &str, field: &str) -> StoreResult<Vec<FieldCount>> {
        let cursor = self
            .collection(collection)
            .aggregate(group_count_pipeline(field))
            .await?;
        let groups: Vec<BsonDocument> = cursor.try_collect().await?;

        Ok(groups
            .into_iter()
            .map(|group| FieldCount {
                count: bson_count(group.get("count")),
                key: group
                    .get("_id")
                    .cloned()
                    .map(Bson::into_relaxed_extjson)
                    .unwrap_or(Value::Null),
            })
            .collect())
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        self.database
            .list_collection_names()
            .await
            .map_err(StoreError::from)
    }

    async fn close(&self) {
        tracing::info!("Shutting down MongoDB client");
        self.client.clone().shutdown().await;
    }
}
