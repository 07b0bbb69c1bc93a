//! HTTP REST API routes

mod character_routes;
mod command_routes;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::EngineError;
use crate::infrastructure::presentation;
use crate::infrastructure::state::AppState;

pub use character_routes::*;
pub use command_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Chat commands
        .route("/api/commands", post(command_routes::execute_command))
        // Sheet routes
        .route(
            "/api/players/{caller_id}",
            get(character_routes::get_player),
        )
        .route(
            "/api/npcs/{id}",
            get(character_routes::get_npc).delete(character_routes::delete_npc),
        )
}

/// Body returned with every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponseDto {
    pub error: &'static str,
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponseDto>);

pub fn status_for(error: &EngineError) -> StatusCode {
    match error {
        EngineError::NotFound(_) | EngineError::NoData(_) => StatusCode::NOT_FOUND,
        EngineError::AlreadyExists(_) => StatusCode::CONFLICT,
        EngineError::ForbiddenAction(_) => StatusCode::FORBIDDEN,
        EngineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAttribute(_)
        | EngineError::InvalidPatent(_)
        | EngineError::ConstraintViolation(_)
        | EngineError::InvalidArgument(_)
        | EngineError::UnknownCommand(_) => StatusCode::BAD_REQUEST,
    }
}

pub(crate) fn api_error(error: EngineError, prefix: &str) -> ApiError {
    if matches!(error, EngineError::Storage(_)) {
        tracing::error!("{}", error);
    }
    (
        status_for(&error),
        Json(ErrorResponseDto {
            error: error.kind(),
            message: presentation::render_error(&error, prefix),
        }),
    )
}
