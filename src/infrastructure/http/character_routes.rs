//! Read-only sheet routes and NPC removal

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::services::CharacterService;
use crate::domain::entities::Character;
use crate::domain::value_objects::{NpcId, PlayerId};
use crate::domain::EngineError;
use crate::infrastructure::http::{api_error, ApiError};
use crate::infrastructure::state::AppState;

fn parse_npc_id(id: &str, prefix: &str) -> Result<NpcId, ApiError> {
    id.parse()
        .map_err(|_| api_error(EngineError::InvalidArgument(format!("invalid NPC id '{}'", id)), prefix))
}

/// Get a player's sheet
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(caller_id): Path<String>,
) -> Result<Json<Character>, ApiError> {
    state
        .character_service
        .get_sheet(&PlayerId::new(caller_id))
        .await
        .map(Json)
        .map_err(|e| api_error(e, &state.config.command_prefix))
}

/// Get an NPC by id
pub async fn get_npc(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Character>, ApiError> {
    let prefix = &state.config.command_prefix;
    let id = parse_npc_id(&id, prefix)?;

    state
        .character_service
        .get_npc(id)
        .await
        .map(Json)
        .map_err(|e| api_error(e, prefix))
}

/// Delete an NPC
pub async fn delete_npc(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let prefix = &state.config.command_prefix;
    let id = parse_npc_id(&id, prefix)?;

    state
        .character_service
        .delete_npc(id)
        .await
        .map_err(|e| api_error(e, prefix))?;

    Ok(StatusCode::NO_CONTENT)
}
