//! GET /test -- storage connectivity diagnostics.
//!
//! Every check runs on its own and reports a human-readable string; a failing
//! check never turns into an error response.

use axum::extract::State;
use axum::Json;
use dappdir::store::DocumentStore;
use serde::Serialize;

use crate::error::truncate_detail;
use crate::state::AppState;

/// Most collection names reported.
pub const MAX_REPORTED_COLLECTIONS: usize = 10;

#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: &'static str,
    pub database: String,
    pub database_url: Option<&'static str>,
    pub database_name: Option<String>,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let store = &state.store;

    if !store.is_connected() {
        return Json(DiagnosticsResponse {
            backend: "✅ Running",
            database: "⚠️ Available but not initialized".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected",
            collections: Vec::new(),
        });
    }

    let (database, collections) = match list_collections(store).await {
        Ok(collections) => ("✅ Connected & Working".to_string(), collections),
        Err(e) => (format!("⚠️ Connected but Error: {e}"), Vec::new()),
    };

    Json(DiagnosticsResponse {
        backend: "✅ Running",
        database,
        database_url: Some(if state.config.database_url.is_some() {
            "✅ Set"
        } else {
            "❌ Not Set"
        }),
        database_name: Some(store.database_name().unwrap_or_default().to_string()),
        connection_status: "Connected",
        collections,
    })
}

async fn list_collections(store: &DocumentStore) -> Result<Vec<String>, String> {
    match store.list_collections().await {
        Ok(mut collections) => {
            collections.sort();
            collections.truncate(MAX_REPORTED_COLLECTIONS);
            Ok(collections)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Diagnostics could not list collections");
            Err(truncate_detail(&e.to_string()))
        }
    }
}
