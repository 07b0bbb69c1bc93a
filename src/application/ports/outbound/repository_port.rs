//! Repository port - Interface for character persistence
//!
//! Services load a record, let the rules mutate the snapshot, and put it
//! back. Adapters only need whole-record reads and writes.

use async_trait::async_trait;

use crate::domain::entities::Character;
use crate::domain::value_objects::{CharacterKey, PlayerId};
use crate::domain::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepoError> for EngineError {
    fn from(error: RepoError) -> Self {
        EngineError::Storage(error.to_string())
    }
}

/// Repository port for player and NPC sheets
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Get a sheet by key
    async fn get(&self, key: &CharacterKey) -> Result<Option<Character>, RepoError>;

    /// Insert or replace a sheet
    async fn put(&self, key: &CharacterKey, character: &Character) -> Result<(), RepoError>;

    /// Delete a sheet, returning whether it existed
    async fn delete(&self, key: &CharacterKey) -> Result<bool, RepoError>;

    /// List every player sheet
    async fn list_players(&self) -> Result<Vec<(PlayerId, Character)>, RepoError>;
}
