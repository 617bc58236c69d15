use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use newsrag_knowledge::RagResponse;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

pub const STATUS_MESSAGE: &str = "Financial News Analyst AI is running.";

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

pub async fn root() -> impl IntoResponse {
    Json(json!({ "status": STATUS_MESSAGE }))
}

pub async fn query_news(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<RagResponse>, ApiError> {
    let response = state.answerer.answer(&request.question).await?;
    Ok(Json(response))
}
