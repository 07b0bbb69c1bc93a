//! Character Service - Application service for sheet management
//!
//! This service provides use case implementations for creating player and
//! NPC sheets and for the small edits players make to their own sheet
//! between fights: talents, special moves and hit points.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::CharacterRepositoryPort;
use crate::application::services::WriteGate;
use crate::domain::entities::{Character, NewCharacter};
use crate::domain::value_objects::{CharacterKey, NpcId, PlayerId};
use crate::domain::EngineError;

/// Character service trait defining the sheet use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// Create the caller's sheet; each identity gets exactly one
    async fn create_character(
        &self,
        player: &PlayerId,
        sheet: NewCharacter,
    ) -> Result<Character, EngineError>;

    /// Get the caller's sheet without touching the store
    async fn get_sheet(&self, player: &PlayerId) -> Result<Character, EngineError>;

    async fn add_talent(&self, player: &PlayerId, talent: &str) -> Result<Character, EngineError>;

    async fn remove_talent(&self, player: &PlayerId, talent: &str)
        -> Result<Character, EngineError>;

    async fn add_special_move(
        &self,
        player: &PlayerId,
        special_move: &str,
    ) -> Result<Character, EngineError>;

    async fn remove_special_move(
        &self,
        player: &PlayerId,
        special_move: &str,
    ) -> Result<Character, EngineError>;

    /// Overwrite current hit points
    async fn update_hit_points(
        &self,
        player: &PlayerId,
        hit_points: u32,
    ) -> Result<Character, EngineError>;

    /// Create an NPC at a GM-chosen id
    async fn create_npc(&self, id: NpcId, sheet: NewCharacter) -> Result<Character, EngineError>;

    async fn get_npc(&self, id: NpcId) -> Result<Character, EngineError>;

    async fn delete_npc(&self, id: NpcId) -> Result<(), EngineError>;
}

/// Default implementation of CharacterService over the repository port
pub struct CharacterServiceImpl {
    repository: Arc<dyn CharacterRepositoryPort>,
    write_gate: WriteGate,
}

impl CharacterServiceImpl {
    pub fn new(repository: Arc<dyn CharacterRepositoryPort>, write_gate: WriteGate) -> Self {
        Self {
            repository,
            write_gate,
        }
    }

    async fn load(&self, key: &CharacterKey) -> Result<Character, EngineError> {
        self.repository
            .get(key)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("character sheet for {}", key)))
    }

    async fn insert_new(
        &self,
        key: CharacterKey,
        sheet: NewCharacter,
    ) -> Result<Character, EngineError> {
        let character = Character::create(sheet)?;

        let _guard = self.write_gate.lock().await;
        if self.repository.get(&key).await?.is_some() {
            return Err(EngineError::AlreadyExists(format!("character sheet for {}", key)));
        }
        self.repository.put(&key, &character).await?;

        info!("Created {} '{}' ({})", key, character.name, character.patent);
        Ok(character)
    }

    async fn modify_player<F>(&self, player: &PlayerId, change: F) -> Result<Character, EngineError>
    where
        F: FnOnce(&mut Character) -> Result<(), EngineError> + Send,
    {
        let key = CharacterKey::Player(player.clone());

        let _guard = self.write_gate.lock().await;
        let mut character = self.load(&key).await?;
        change(&mut character)?;
        self.repository.put(&key, &character).await?;

        Ok(character)
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self, sheet), fields(player = %player, name = %sheet.name))]
    async fn create_character(
        &self,
        player: &PlayerId,
        sheet: NewCharacter,
    ) -> Result<Character, EngineError> {
        self.insert_new(CharacterKey::Player(player.clone()), sheet)
            .await
    }

    #[instrument(skip(self))]
    async fn get_sheet(&self, player: &PlayerId) -> Result<Character, EngineError> {
        debug!("Fetching sheet for player {}", player);
        self.load(&CharacterKey::Player(player.clone())).await
    }

    #[instrument(skip(self))]
    async fn add_talent(&self, player: &PlayerId, talent: &str) -> Result<Character, EngineError> {
        self.modify_player(player, |character| character.add_talent(talent))
            .await
    }

    #[instrument(skip(self))]
    async fn remove_talent(
        &self,
        player: &PlayerId,
        talent: &str,
    ) -> Result<Character, EngineError> {
        self.modify_player(player, |character| character.remove_talent(talent))
            .await
    }

    #[instrument(skip(self))]
    async fn add_special_move(
        &self,
        player: &PlayerId,
        special_move: &str,
    ) -> Result<Character, EngineError> {
        self.modify_player(player, |character| character.add_special_move(special_move))
            .await
    }

    #[instrument(skip(self))]
    async fn remove_special_move(
        &self,
        player: &PlayerId,
        special_move: &str,
    ) -> Result<Character, EngineError> {
        self.modify_player(player, |character| {
            character.remove_special_move(special_move)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn update_hit_points(
        &self,
        player: &PlayerId,
        hit_points: u32,
    ) -> Result<Character, EngineError> {
        self.modify_player(player, |character| {
            character.hit_points = hit_points;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, sheet), fields(npc = %id, name = %sheet.name))]
    async fn create_npc(&self, id: NpcId, sheet: NewCharacter) -> Result<Character, EngineError> {
        self.insert_new(CharacterKey::Npc(id), sheet).await
    }

    #[instrument(skip(self))]
    async fn get_npc(&self, id: NpcId) -> Result<Character, EngineError> {
        self.load(&CharacterKey::Npc(id)).await
    }

    #[instrument(skip(self))]
    async fn delete_npc(&self, id: NpcId) -> Result<(), EngineError> {
        let key = CharacterKey::Npc(id);

        let _guard = self.write_gate.lock().await;
        if self.repository.delete(&key).await? {
            info!("Deleted {}", key);
            Ok(())
        } else {
            Err(EngineError::NotFound(key.to_string()))
        }
    }
}
