use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tl_core::{ComputeDevice, Precision, SummarizationRequest};
use tl_inference::presets::{self, ModelPreset};
use tl_inference::TextSummarizer;

use crate::AppState;

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub model: Option<String>,
    pub requested_model: Option<String>,
    pub device: Option<ComputeDevice>,
    pub precision: Option<Precision>,
}

impl ModelStatus {
    fn from_summarizer(summarizer: Option<&TextSummarizer>) -> Self {
        Self {
            loaded: summarizer.is_some(),
            model: summarizer.map(|s| s.model_identifier().to_string()),
            requested_model: summarizer.map(|s| s.requested_model().to_string()),
            device: summarizer.map(|s| s.device()),
            precision: summarizer.map(|s| s.precision()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoadModelRequest {
    /// Preset key, preset label or raw model id.
    pub model: Option<String>,
}

pub async fn list_models() -> Json<Vec<ModelPreset>> {
    Json(presets::PRESETS.to_vec())
}

pub async fn get_model(State(state): State<Arc<AppState>>) -> Json<ModelStatus> {
    let current = state.current().await;
    Json(ModelStatus::from_summarizer(current.as_deref()))
}

pub async fn load_model(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoadModelRequest>,
) -> Result<Json<ModelStatus>, ApiError> {
    let model_id = presets::resolve_model(request.model.as_deref());
    tracing::info!("🔄 Loading {}", model_id);
    let summarizer = state.load(&model_id).await.map_err(|e| {
        tracing::error!("Error loading model {}: {}", model_id, e);
        ApiError::new(StatusCode::BAD_GATEWAY, e.to_string())
    })?;
    Ok(Json(ModelStatus::from_summarizer(Some(&summarizer))))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.raw_text.trim().is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Please enter some text first.",
        ));
    }
    request
        .check_params()
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
    let summarizer = state.current().await.ok_or_else(|| {
        ApiError::new(StatusCode::CONFLICT, "Please load a model first.")
    })?;
    Ok(Json(summarizer.summarize(&request).await))
}
