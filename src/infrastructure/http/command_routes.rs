//! Chat command endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::dto::CommandOutcome;
use crate::domain::value_objects::PlayerId;
use crate::infrastructure::http::{api_error, ApiError};
use crate::infrastructure::presentation;
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommandRequestDto {
    /// Identity of whoever sent the message
    pub caller_id: String,
    /// Raw message text, prefix included
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommandResponseDto {
    pub reply: String,
    pub outcome: CommandOutcome,
}

/// Run one chat command and return the rendered reply
pub async fn execute_command(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CommandRequestDto>,
) -> Result<Json<CommandResponseDto>, ApiError> {
    let commands = &state.command_service;
    let caller = PlayerId::new(req.caller_id);

    let outcome = commands
        .execute(&caller, &req.content)
        .await
        .map_err(|e| api_error(e, commands.prefix()))?;

    Ok(Json(CommandResponseDto {
        reply: presentation::render(&outcome, commands.prefix()),
        outcome,
    }))
}
