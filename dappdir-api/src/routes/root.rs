use axum::Json;
use serde::Serialize;

pub const LIVENESS_MESSAGE: &str = "Web3 Dapp Discovery API running";

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub message: &'static str,
}

/// GET / -- static liveness message.
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: LIVENESS_MESSAGE,
    })
}
