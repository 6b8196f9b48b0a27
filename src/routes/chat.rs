use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, HealthResponse, INFO_MESSAGE, InfoResponse},
    services::relay::relay_chat,
    state::SharedState,
};

pub async fn info_handler() -> Json<InfoResponse> {
    Json(InfoResponse { message: INFO_MESSAGE.to_string() })
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// Body errors are turned into `{"detail": ...}` before any provider call.
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;
    relay_chat(&state, request).await.map(Json)
}
