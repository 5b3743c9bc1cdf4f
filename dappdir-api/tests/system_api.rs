//! Integration tests for the liveness, schema and diagnostics endpoints.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_disconnected_app, build_test_app, create_dapp, get, test_store, FailingStore};
use dappdir::store::DocumentStore;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn root_reports_liveness() {
    let response = get(build_test_app(test_store()), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Web3 Dapp Discovery API running" })
    );
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(build_test_app(test_store()), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn schema_lists_every_record_kind() {
    let response = get(build_disconnected_app(), "/schema").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let mut keys = json.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
    keys.sort();
    assert_eq!(keys, ["comment", "dapp", "product", "user"]);

    assert_eq!(json["dapp"]["title"], "Dapp");
    assert_eq!(json["dapp"]["required"], json!(["name", "tagline"]));
    assert_eq!(json["comment"]["properties"]["content"]["maxLength"], 1000);
    assert_eq!(json["product"]["properties"]["in_stock"]["default"], true);
}

#[tokio::test]
async fn diagnostics_report_connected_store() {
    let app = build_test_app(test_store());
    create_dapp(&app, json!({ "name": "Foo", "tagline": "Bar" })).await;

    let response = get(app, "/test").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["backend"], "✅ Running");
    assert_eq!(json["database"], "✅ Connected & Working");
    assert_eq!(json["database_url"], "✅ Set");
    assert_eq!(json["database_name"], "dapps_test");
    assert_eq!(json["connection_status"], "Connected");
    assert_eq!(json["collections"], json!(["dapp"]));
}

#[tokio::test]
async fn diagnostics_never_fail_without_a_database() {
    let response = get(build_disconnected_app(), "/test").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["backend"], "✅ Running");
    assert_eq!(json["database"], "⚠️ Available but not initialized");
    assert_eq!(json["database_url"], json!(null));
    assert_eq!(json["database_name"], json!(null));
    assert_eq!(json["connection_status"], "Not Connected");
    assert_eq!(json["collections"], json!([]));
}

#[tokio::test]
async fn diagnostics_report_a_failing_store_as_a_truncated_string() {
    let app = build_test_app(DocumentStore::new(FailingStore));

    let response = get(app, "/test").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let database = json["database"].as_str().unwrap();
    let reason = database.strip_prefix("⚠️ Connected but Error: ").unwrap();
    assert!(!reason.is_empty());
    assert!(reason.chars().count() <= 80);

    assert_eq!(json["backend"], "✅ Running");
    assert_eq!(json["connection_status"], "Connected");
    assert_eq!(json["database_name"], "unreachable");
    assert_eq!(json["collections"], json!([]));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = build_test_app(test_store());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/dapps")
                .header("origin", "https://example.com")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "https://example.com"
    );
}
