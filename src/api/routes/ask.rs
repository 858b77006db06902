use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::application::AskParams;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub prompt: String,
    #[serde(default)]
    pub document_paths: Vec<String>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_overlap")]
    pub overlap: usize,
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub chat_model: Option<String>,
    #[serde(default = "default_embeddings_model")]
    pub embeddings_model: String,
}

fn default_chunk_size() -> usize {
    AskParams::DEFAULT_CHUNK_SIZE
}

fn default_overlap() -> usize {
    AskParams::DEFAULT_OVERLAP
}

fn default_k() -> usize {
    AskParams::DEFAULT_K
}

fn default_embeddings_model() -> String {
    AskParams::DEFAULT_EMBEDDINGS_MODEL.to_string()
}

impl AskRequest {
    fn into_params(self, default_chat_model: &str) -> AskParams {
        AskParams {
            prompt: self.prompt,
            document_paths: self.document_paths,
            chunk_size: self.chunk_size,
            overlap: self.overlap,
            k: self.k,
            chat_model: self
                .chat_model
                .unwrap_or_else(|| default_chat_model.to_string()),
            embeddings_model: self.embeddings_model,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
}

pub async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, StatusCode> {
    let params = request.into_params(&state.config.default_chat_model);
    let prompt = params.prompt.clone();

    let session = state.sessions.build(params).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to build session");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let response = session.ask(&prompt).await.map_err(|e| {
        tracing::error!(error = %e, "Agent query failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(AskResponse { response }))
}
