pub mod comments;
pub mod dapps;
pub mod diagnostics;
pub mod root;
pub mod schema;

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use dappdir::schema::ValidationErrors;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Build the route tree.
///
/// ```text
/// /                     liveness
/// /test                 storage diagnostics
/// /schema               JSON schemas of every record kind
/// /dapps                list, create
/// /dapps/{id}           get
/// /dapps/{id}/vote      vote (POST)
/// /comments             list by dapp, create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root::liveness))
        .route("/test", get(diagnostics::diagnostics))
        .route("/schema", get(schema::get_schema))
        .route("/dapps", get(dapps::list_dapps).post(dapps::create_dapp))
        .route("/dapps/{id}", get(dapps::get_dapp))
        .route("/dapps/{id}/vote", post(dapps::vote_dapp))
        .route("/comments", get(comments::list_comments).post(comments::create_comment))
}

/// Response body of every create endpoint.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Unwraps a JSON body, reporting an unreadable one as a validation failure on `body`.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> AppResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::Validation(ValidationErrors::single("body", rejection.body_text())))
}

/// Treats an empty query parameter as absent.
pub(crate) fn non_empty(param: Option<String>) -> Option<String> {
    param.filter(|value| !value.is_empty())
}
