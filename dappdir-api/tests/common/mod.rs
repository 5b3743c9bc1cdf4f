#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use dappdir::backend::StoreBackend;
use dappdir::bson::{DateTime, Document, oid::ObjectId};
use dappdir::error::{DocumentStoreError, DocumentStoreResult};
use dappdir::memory::InMemoryStore;
use dappdir::query::Query;
use dappdir::store::DocumentStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use dappdir_api::config::ServerConfig;
use dappdir_api::router::build_app_router;
use dappdir_api::state::AppState;

/// Build a test `ServerConfig` pointing at the in-memory backend.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: Some("memory://".to_string()),
        database_name: Some("dapps_test".to_string()),
    }
}

/// A fresh in-memory store shared by the app and the test.
pub fn test_store() -> DocumentStore {
    DocumentStore::new(InMemoryStore::with_database_name("dapps_test"))
}

/// Build the full application router over `store`.
pub fn build_test_app(store: DocumentStore) -> Router {
    build_app_router(AppState::new(store, test_config()))
}

/// Build the router with no database behind it.
pub fn build_disconnected_app() -> Router {
    build_app_router(AppState::new(
        DocumentStore::disconnected(),
        ServerConfig::default(),
    ))
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a dapp through the API and returns its id.
pub async fn create_dapp(app: &Router, body: Value) -> String {
    let response = post_json(app.clone(), "/dapps", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// A connected backend whose every call fails with a long error message.
#[derive(Debug)]
pub struct FailingStore;

impl FailingStore {
    fn error() -> DocumentStoreError {
        DocumentStoreError::Read(format!("server selection timeout: {}", "no reachable servers, ".repeat(10)))
    }
}

#[async_trait]
impl StoreBackend for FailingStore {
    fn database_name(&self) -> &str {
        "unreachable"
    }

    async fn insert_document(&self, _document: Document, _collection: &str) -> DocumentStoreResult<ObjectId> {
        Err(Self::error())
    }

    async fn find_by_id(&self, _id: ObjectId, _collection: &str) -> DocumentStoreResult<Option<Document>> {
        Err(Self::error())
    }

    async fn query_documents(&self, _query: Query, _collection: &str) -> DocumentStoreResult<Vec<Document>> {
        Err(Self::error())
    }

    async fn increment_field(
        &self,
        _id: ObjectId,
        _field: &str,
        _delta: i64,
        _modified_at: DateTime,
        _collection: &str,
    ) -> DocumentStoreResult<u64> {
        Err(Self::error())
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        Err(Self::error())
    }
}
