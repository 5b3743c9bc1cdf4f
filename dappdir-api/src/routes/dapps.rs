//! Handlers for dapp listings and votes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use dappdir::{
    document::DocumentExt,
    query::Filter,
    record::Dapp,
    schema::Kind,
    serialize::to_transport,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::routes::{json_body, non_empty, CreatedResponse};
use crate::state::AppState;

/// Most dapps returned by one listing.
pub const DAPP_LIST_LIMIT: usize = 100;

/// Field incremented by a vote.
const VOTES_FIELD: &str = "votes";

#[derive(Debug, Default, Deserialize)]
pub struct DappListParams {
    pub category: Option<String>,
    /// Matches dapps whose `chains` contain this chain.
    pub chain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub success: bool,
}

/// POST /dapps
pub async fn create_dapp(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<CreatedResponse>> {
    let dapp = Dapp::from_json_validated(&json_body(body)?)?;
    let id = state.store.create_document(&dapp).await?;

    tracing::info!(%id, name = %dapp.name, "Dapp created");

    Ok(Json(CreatedResponse { id }))
}

/// GET /dapps
///
/// Filters by exact `category` and by membership of `chain` in `chains`, both optional.
pub async fn list_dapps(
    State(state): State<AppState>,
    Query(params): Query<DappListParams>,
) -> AppResult<Json<Vec<Map<String, Value>>>> {
    let mut predicates = Vec::new();
    if let Some(category) = non_empty(params.category) {
        predicates.push(Filter::eq("category", category));
    }
    if let Some(chain) = non_empty(params.chain) {
        predicates.push(Filter::any_of("chains", [chain]));
    }
    let filter = (!predicates.is_empty()).then(|| Filter::and(predicates));

    let dapps = state
        .store
        .get_documents(Kind::Dapp, filter, DAPP_LIST_LIMIT)
        .await?;

    Ok(Json(dapps.into_iter().map(to_transport).collect()))
}

/// GET /dapps/{id}
pub async fn get_dapp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Map<String, Value>>> {
    let dapp = state
        .store
        .get_by_id(Kind::Dapp, &id)
        .await
        .map_err(|e| AppError::lookup("Dapp", e))?;

    Ok(Json(to_transport(dapp)))
}

/// POST /dapps/{id}/vote
///
/// Adds one vote atomically; concurrent votes are never lost.
pub async fn vote_dapp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<VoteResponse>> {
    state
        .store
        .increment_field(Kind::Dapp, &id, VOTES_FIELD, 1)
        .await
        .map_err(|e| AppError::lookup("Dapp", e))?;

    Ok(Json(VoteResponse { success: true }))
}
