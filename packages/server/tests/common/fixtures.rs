//! Test fixtures for creating test data.

use laptop_core::kernel::{Document, InMemoryDocumentStore};
use serde_json::{json, Value};

/// Minimal valid create payload
pub fn laptop_payload(name: &str, brand: &str, price: f64) -> Value {
    json!({
        "name": name,
        "brand": brand,
        "price": price,
    })
}

/// Create payload with every optional field set
pub fn full_laptop_payload() -> Value {
    json!({
        "name": "ThinkPad X1 Carbon",
        "brand": "Lenovo",
        "price": 1649.99,
        "cpu": "Intel Core Ultra 7 155U",
        "ram_gb": 32,
        "storage": "1TB SSD",
        "gpu": "Intel Graphics",
        "screen": "14\" 2.8K OLED",
        "os": "Windows 11 Pro",
        "rating": 4.7,
        "stock": 3,
        "image_url": "https://example.com/x1.png",
        "highlights": ["1.09 kg", "MIL-STD-810H"]
    })
}

/// Insert raw documents, bypassing validation
pub async fn seed_laptops(store: &InMemoryDocumentStore, documents: Vec<Value>) {
    let documents: Vec<Document> = documents
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();
    store.seed("laptop", documents).await;
}
