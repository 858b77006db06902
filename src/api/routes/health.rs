use axum::{extract::State, http::StatusCode, Json};
use qdrant_client::Qdrant;
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub vector_store: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, StatusCode> {
    let vector_store = match Qdrant::from_url(&state.config.qdrant_url).build() {
        Ok(client) => {
            if client.health_check().await.is_ok() {
                "reachable"
            } else {
                "unreachable"
            }
        }
        Err(_) => "unreachable",
    };

    let is_ready = vector_store == "reachable";

    let response = ReadinessResponse {
        status: if is_ready { "ready" } else { "not_ready" }.into(),
        vector_store: vector_store.into(),
    };

    if is_ready {
        Ok(Json(response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
