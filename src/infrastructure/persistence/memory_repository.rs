//! In-memory character store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{CharacterRepositoryPort, RepoError};
use crate::domain::entities::Character;
use crate::domain::value_objects::{CharacterKey, PlayerId};

/// Volatile character store, used for development and tests
#[derive(Default)]
pub struct InMemoryCharacterRepository {
    records: RwLock<HashMap<CharacterKey, Character>>,
}

impl InMemoryCharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored record
    pub async fn snapshot(&self) -> HashMap<CharacterKey, Character> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl CharacterRepositoryPort for InMemoryCharacterRepository {
    async fn get(&self, key: &CharacterKey) -> Result<Option<Character>, RepoError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, key: &CharacterKey, character: &Character) -> Result<(), RepoError> {
        self.records
            .write()
            .await
            .insert(key.clone(), character.clone());
        Ok(())
    }

    async fn delete(&self, key: &CharacterKey) -> Result<bool, RepoError> {
        Ok(self.records.write().await.remove(key).is_some())
    }

    async fn list_players(&self) -> Result<Vec<(PlayerId, Character)>, RepoError> {
        let records = self.records.read().await;
        let mut players: Vec<(PlayerId, Character)> = records
            .iter()
            .filter_map(|(key, character)| match key {
                CharacterKey::Player(id) => Some((id.clone(), character.clone())),
                CharacterKey::Npc(_) => None,
            })
            .collect();
        players.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(players)
    }
}
