//! Handlers for comments attached to dapps.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use dappdir::{
    document::DocumentExt,
    error::DocumentStoreError,
    query::Filter,
    record::Comment,
    schema::{Kind, ValidationErrors},
    serialize::to_transport,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::routes::{json_body, non_empty, CreatedResponse};
use crate::state::AppState;

/// Most comments returned for one dapp.
pub const COMMENT_LIST_LIMIT: usize = 200;

#[derive(Debug, Default, Deserialize)]
pub struct CommentListParams {
    pub dapp_id: Option<String>,
}

/// POST /comments
///
/// The referenced dapp must exist; a malformed `dapp_id` counts as missing.
pub async fn create_comment(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<CreatedResponse>> {
    let comment = Comment::from_json_validated(&json_body(body)?)?;

    match state.store.get_by_id(Kind::Dapp, &comment.dapp_id).await {
        Ok(_) => {}
        Err(DocumentStoreError::NotFound { .. } | DocumentStoreError::InvalidId(_)) => {
            return Err(AppError::NotFound("Dapp not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    let id = state.store.create_document(&comment).await?;
    tracing::info!(%id, dapp_id = %comment.dapp_id, "Comment created");

    Ok(Json(CreatedResponse { id }))
}

/// GET /comments?dapp_id=...
pub async fn list_comments(
    State(state): State<AppState>,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<Vec<Map<String, Value>>>> {
    let dapp_id = non_empty(params.dapp_id)
        .ok_or_else(|| ValidationErrors::single("dapp_id", "field required"))?;

    let comments = state
        .store
        .get_documents(Kind::Comment, Some(Filter::eq("dapp_id", dapp_id)), COMMENT_LIST_LIMIT)
        .await?;

    Ok(Json(comments.into_iter().map(to_transport).collect()))
}
