use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{FieldError, ValidationErrors};
use crate::domains::laptops::data::{BrandCount, LaptopRecord};
use crate::domains::laptops::filter::LaptopQuery;
use crate::kernel::{BaseDocumentStore, Document, StoreError, StoreResult};

/// Collection holding laptop records
pub const LAPTOP_COLLECTION: &str = "laptop";

/// Field the brand aggregation groups on
pub const BRAND_FIELD: &str = "brand";

const DEFAULT_RATING: f64 = 4.5;
const DEFAULT_STOCK: i64 = 10;
const MAX_RATING: f64 = 5.0;

fn default_rating() -> Option<f64> {
    Some(DEFAULT_RATING)
}

fn default_stock() -> i64 {
    DEFAULT_STOCK
}

/// A laptop product as submitted for creation and persisted in the store.
///
/// Omitted `rating` defaults to 4.5 and omitted `stock` to 10; an explicit
/// `null` rating is kept as null. Bounds are checked by [`Laptop::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laptop {
    pub name: String,
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub cpu: Option<String>,
    #[serde(default)]
    pub ram_gb: Option<i64>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub gpu: Option<String>,
    #[serde(default)]
    pub screen: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default = "default_rating")]
    pub rating: Option<f64>,
    #[serde(default = "default_stock")]
    pub stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
}

impl Laptop {
    /// Check field bounds, collecting every failure.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !self.price.is_finite() {
            errors.push(FieldError::new("body", "price", "Input should be a finite number"));
        } else if self.price < 0.0 {
            errors.push(FieldError::new(
                "body",
                "price",
                "Input should be greater than or equal to 0",
            ));
        }

        if let Some(ram_gb) = self.ram_gb {
            if ram_gb < 1 {
                errors.push(FieldError::new(
                    "body",
                    "ram_gb",
                    "Input should be greater than or equal to 1",
                ));
            }
        }

        if let Some(rating) = self.rating {
            if !rating.is_finite() {
                errors.push(FieldError::new("body", "rating", "Input should be a finite number"));
            } else if rating < 0.0 {
                errors.push(FieldError::new(
                    "body",
                    "rating",
                    "Input should be greater than or equal to 0",
                ));
            } else if rating > MAX_RATING {
                errors.push(FieldError::new(
                    "body",
                    "rating",
                    "Input should be less than or equal to 5",
                ));
            }
        }

        if self.stock < 0 {
            errors.push(FieldError::new(
                "body",
                "stock",
                "Input should be greater than or equal to 0",
            ));
        }

        errors.into_result()
    }

    /// Persisted form: every field plus creation timestamps.
    pub fn into_document(self, now: DateTime<Utc>) -> StoreResult<Document> {
        let mut document = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(StoreError::Encoding("laptop is not an object".to_string())),
            Err(e) => return Err(StoreError::Encoding(e.to_string())),
        };

        let timestamp = Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true));
        document.insert("created_at".to_string(), timestamp.clone());
        document.insert("updated_at".to_string(), timestamp);
        Ok(document)
    }
}

// =============================================================================
// Laptop Queries
// =============================================================================

impl Laptop {
    /// Insert the laptop and return its identifier.
    pub async fn create(self, store: &dyn BaseDocumentStore) -> StoreResult<String> {
        let document = self.into_document(Utc::now())?;
        store.insert_one(LAPTOP_COLLECTION, document).await
    }

    /// Records matching `query`, shaped for output.
    pub async fn find(
        query: &LaptopQuery,
        store: &dyn BaseDocumentStore,
    ) -> StoreResult<Vec<LaptopRecord>> {
        let documents = store
            .find(LAPTOP_COLLECTION, &query.to_filter(), query.limit())
            .await?;
        Ok(documents.into_iter().map(LaptopRecord::from_document).collect())
    }

    /// Number of records per brand, sorted by brand.
    ///
    /// Groups whose key is null, missing or empty are dropped.
    pub async fn brand_counts(store: &dyn BaseDocumentStore) -> StoreResult<Vec<BrandCount>> {
        let groups = store.count_by_field(LAPTOP_COLLECTION, BRAND_FIELD).await?;
        Ok(groups.into_iter().filter_map(BrandCount::from_group).collect())
    }
}
