use serde::Serialize;
use serde_json::Value;

use crate::kernel::{Document, FieldCount, INTERNAL_ID_FIELD};

/// Field exposing the record identifier to clients
pub const EXTERNAL_ID_FIELD: &str = "id";

/// A stored laptop as returned to clients.
///
/// The internal identifier is replaced by `id` holding its string form; every
/// other stored field passes through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LaptopRecord(Document);

impl LaptopRecord {
    pub fn from_document(mut document: Document) -> Self {
        if let Some(internal_id) = document.remove(INTERNAL_ID_FIELD) {
            document.insert(
                EXTERNAL_ID_FIELD.to_string(),
                Value::String(id_to_string(internal_id)),
            );
        }
        Self(document)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get(EXTERNAL_ID_FIELD).and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// String form of a store identifier.
///
/// Handles plain strings, extended-JSON object ids (`{"$oid": "..."}`) and
/// falls back to the JSON rendering for anything else.
fn id_to_string(id: Value) -> String {
    match id {
        Value::String(s) => s,
        Value::Object(map) => {
            let oid = map.get("$oid").and_then(Value::as_str).map(str::to_string);
            oid.unwrap_or_else(|| Value::Object(map).to_string())
        }
        other => other.to_string(),
    }
}

/// Number of laptops sharing one brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandCount {
    pub name: String,
    pub count: u64,
}

impl BrandCount {
    /// Keep groups keyed by a non-empty brand name.
    pub fn from_group(group: FieldCount) -> Option<Self> {
        match group.key {
            Value::String(name) if !name.is_empty() => Some(Self {
                name,
                count: group.count,
            }),
            _ => None,
        }
    }
}

/// Response body for the laptop listing
#[derive(Debug, Serialize)]
pub struct LaptopList {
    pub items: Vec<LaptopRecord>,
    pub count: usize,
}

impl From<Vec<LaptopRecord>> for LaptopList {
    fn from(items: Vec<LaptopRecord>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Response body for the brand aggregation
#[derive(Debug, Serialize)]
pub struct BrandList {
    pub items: Vec<BrandCount>,
}

/// Response body for a successful create
#[derive(Debug, Serialize)]
pub struct LaptopCreated {
    pub id: String,
    pub message: String,
}

impl LaptopCreated {
    pub fn new(id: String) -> Self {
        Self {
            id,
            message: "Laptop created".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    #[test]
    fn internal_id_is_replaced() {
        let record = LaptopRecord::from_document(doc(json!({
            "_id": "abc-123",
            "name": "ThinkPad"
        })));

        assert_eq!(record.id(), Some("abc-123"));
        assert_eq!(record.get("_id"), None);
        assert_eq!(record.get("name"), Some(&json!("ThinkPad")));
    }

    #[test]
    fn object_id_uses_hex_string() {
        let record = LaptopRecord::from_document(doc(json!({
            "_id": {"$oid": "65f1c2a9e4b0a1b2c3d4e5f6"}
        })));
        assert_eq!(record.id(), Some("65f1c2a9e4b0a1b2c3d4e5f6"));
    }

    #[test]
    fn numeric_id_is_stringified() {
        let record = LaptopRecord::from_document(doc(json!({"_id": 42})));
        assert_eq!(record.id(), Some("42"));
    }

    #[test]
    fn document_without_id_has_no_id() {
        let record = LaptopRecord::from_document(doc(json!({"name": "Bare"})));
        assert_eq!(record.id(), None);
    }

    #[test]
    fn empty_and_null_brands_are_dropped() {
        let groups = vec![
            FieldCount { key: Value::Null, count: 2 },
            FieldCount { key: json!(""), count: 1 },
            FieldCount { key: json!("Dell"), count: 3 },
        ];
        let brands: Vec<BrandCount> = groups.into_iter().filter_map(BrandCount::from_group).collect();

        assert_eq!(
            brands,
            vec![BrandCount {
                name: "Dell".to_string(),
                count: 3
            }]
        );
    }

    #[test]
    fn list_counts_items() {
        let list = LaptopList::from(vec![
            LaptopRecord::from_document(doc(json!({"_id": "1"}))),
            LaptopRecord::from_document(doc(json!({"_id": "2"}))),
        ]);
        assert_eq!(list.count, 2);
    }
}
