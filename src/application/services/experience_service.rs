//! Experience Service - XP grants and weekly award calculation

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::dto::ExperienceGrant;
use crate::application::ports::outbound::CharacterRepositoryPort;
use crate::application::services::WriteGate;
use crate::domain::services::{self, MasterExperience};
use crate::domain::value_objects::{CharacterKey, PlayerId};
use crate::domain::EngineError;

pub struct ExperienceService {
    repository: Arc<dyn CharacterRepositoryPort>,
    write_gate: WriteGate,
}

impl ExperienceService {
    pub fn new(repository: Arc<dyn CharacterRepositoryPort>, write_gate: WriteGate) -> Self {
        Self {
            repository,
            write_gate,
        }
    }

    /// Add the sum of `values` to the caller's experience
    ///
    /// Every value is validated before the sheet is looked up.
    #[instrument(skip(self))]
    pub async fn add_experience<S>(
        &self,
        player: &PlayerId,
        values: &[S],
    ) -> Result<ExperienceGrant, EngineError>
    where
        S: AsRef<str> + std::fmt::Debug + Sync,
    {
        let added = services::parse_experience_deltas(values)?;
        let key = CharacterKey::Player(player.clone());

        let _guard = self.write_gate.lock().await;
        let mut character = self
            .repository
            .get(&key)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("character sheet for {}", key)))?;

        let clamped = character.gain_experience(added);
        self.repository.put(&key, &character).await?;

        if clamped {
            warn!(
                "Experience for {} clamped to {}",
                character.name, character.experience
            );
        }
        info!("+{} XP for {} (total {})", added, character.name, character.experience);

        Ok(ExperienceGrant {
            character: character.name,
            added,
            total: character.experience,
            clamped,
        })
    }

    /// Weekly master and gold-knight awards from the players' average
    #[instrument(skip(self))]
    pub async fn master_experience(&self) -> Result<MasterExperience, EngineError> {
        let experience: Vec<u32> = self
            .repository
            .list_players()
            .await?
            .into_iter()
            .map(|(_, character)| character.experience)
            .collect();

        services::master_experience(&experience)
    }
}
