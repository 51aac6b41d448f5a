use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::app::AppState;

/// Collections advertised to tooling
pub const KNOWN_COLLECTIONS: [&str; 3] = ["user", "product", "laptop"];

/// Most collection names reported by the diagnostic endpoint
const MAX_LISTED_COLLECTIONS: usize = 10;

/// Longest error excerpt embedded in the diagnostic response
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub collections: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Liveness message
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Laptop Store API is running".to_string(),
    })
}

/// Static list of known collections
pub async fn schema_handler() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        collections: KNOWN_COLLECTIONS.iter().map(|c| c.to_string()).collect(),
    })
}

/// Database diagnostic endpoint
///
/// Never fails: store errors are reported as strings in the body and the
/// response is always 200 OK.
pub async fn diagnostics_handler(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let mut response = DiagnosticsResponse {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: None,
        database_name: None,
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let Some(store) = state.store.as_deref() else {
        response.database = "⚠️  Available but not initialized".to_string();
        return Json(response);
    };

    response.database = "✅ Available".to_string();
    response.database_url = Some(
        if state.config.database_url.is_some() {
            "✅ Set"
        } else {
            "❌ Not Set"
        }
        .to_string(),
    );
    response.database_name = Some(
        state
            .config
            .database_name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
    );
    response.connection_status = "Connected".to_string();

    match store.list_collection_names().await {
        Ok(names) => {
            response.collections = names.into_iter().take(MAX_LISTED_COLLECTIONS).collect();
            response.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Diagnostic collection listing failed");
            response.database = format!(
                "⚠️  Connected but Error: {}",
                truncate_chars(&e.to_string(), MAX_ERROR_CHARS)
            );
        }
    }

    Json(response)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
