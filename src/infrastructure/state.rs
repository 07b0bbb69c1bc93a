//! Shared application state

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::outbound::CharacterRepositoryPort;
use crate::application::services::{
    new_write_gate, CharacterServiceImpl, CombatService, CommandService, ExperienceService,
};
use crate::domain::services::DiceRoller;
use crate::infrastructure::config::{AppConfig, StorageBackend};
use crate::infrastructure::persistence::{
    InMemoryCharacterRepository, JsonFileCharacterRepository, SqliteCharacterRepository,
};
use crate::infrastructure::random_adapter::ThreadRngDice;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    // Application services
    pub character_service: Arc<CharacterServiceImpl>,
    pub command_service: CommandService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let repository = open_repository(&config).await?;
        Ok(Self::with_parts(config, repository, Arc::new(ThreadRngDice::new())))
    }

    /// Wire the services over an already opened store and dice source
    pub fn with_parts(
        config: AppConfig,
        repository: Arc<dyn CharacterRepositoryPort>,
        dice: Arc<dyn DiceRoller>,
    ) -> Self {
        // One gate shared by every service that writes
        let write_gate = new_write_gate();

        let character_service = Arc::new(CharacterServiceImpl::new(
            repository.clone(),
            write_gate.clone(),
        ));
        let combat_service = Arc::new(CombatService::new(
            repository.clone(),
            dice,
            write_gate.clone(),
        ));
        let experience_service = Arc::new(ExperienceService::new(repository, write_gate));
        let command_service = CommandService::new(
            config.command_prefix.clone(),
            character_service.clone(),
            combat_service,
            experience_service,
        );

        Self {
            config,
            character_service,
            command_service,
        }
    }
}

async fn open_repository(config: &AppConfig) -> Result<Arc<dyn CharacterRepositoryPort>> {
    let repository: Arc<dyn CharacterRepositoryPort> = match config.storage_backend {
        StorageBackend::Json => {
            tracing::info!("  Storage: JSON file {}", config.data_file.display());
            Arc::new(JsonFileCharacterRepository::new(&config.data_file))
        }
        StorageBackend::Sqlite => {
            tracing::info!("  Storage: SQLite {}", config.sqlite_url);
            if let Some(parent) = sqlite_parent_dir(&config.sqlite_url) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let repository = SqliteCharacterRepository::connect(&config.sqlite_url)
                .await
                .context("Failed to open SQLite database")?;
            Arc::new(repository)
        }
        StorageBackend::Memory => {
            tracing::warn!("  Storage: in-memory, data is lost on restart");
            Arc::new(InMemoryCharacterRepository::new())
        }
    };

    Ok(repository)
}

/// Directory holding a file-backed SQLite database, if the URL names one
fn sqlite_parent_dir(url: &str) -> Option<&Path> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/cosmo.db?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("sqlite://cosmo.db"), None);
    }
}
