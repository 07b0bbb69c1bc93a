//! JSON document character store
//!
//! The whole data set lives in one document:
//!
//! ```json
//! { "players": { "<caller id>": {...} }, "npcs": { "<id>": {...} }, "xp_log": {} }
//! ```
//!
//! Every operation reads the document, and writes replace it atomically
//! (temp file + rename). `xp_log` is carried through untouched.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ports::outbound::{CharacterRepositoryPort, RepoError};
use crate::domain::entities::Character;
use crate::domain::value_objects::{CharacterKey, PlayerId};

#[derive(Debug, Default, Serialize, Deserialize)]
struct DataDocument {
    #[serde(default)]
    players: BTreeMap<String, Character>,
    #[serde(default)]
    npcs: BTreeMap<String, Character>,
    #[serde(default)]
    xp_log: serde_json::Map<String, serde_json::Value>,
}

impl DataDocument {
    fn namespace(&self, key: &CharacterKey) -> &BTreeMap<String, Character> {
        match key {
            CharacterKey::Player(_) => &self.players,
            CharacterKey::Npc(_) => &self.npcs,
        }
    }

    fn namespace_mut(&mut self, key: &CharacterKey) -> &mut BTreeMap<String, Character> {
        match key {
            CharacterKey::Player(_) => &mut self.players,
            CharacterKey::Npc(_) => &mut self.npcs,
        }
    }
}

/// Character store backed by a single JSON file
pub struct JsonFileCharacterRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileCharacterRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<DataDocument, RepoError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| RepoError::Serialization(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No data file at {}, starting empty", self.path.display());
                Ok(DataDocument::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, document: &DataDocument) -> Result<(), RepoError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(document)
            .map_err(|e| RepoError::Serialization(e.to_string()))?;
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, contents).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CharacterRepositoryPort for JsonFileCharacterRepository {
    async fn get(&self, key: &CharacterKey) -> Result<Option<Character>, RepoError> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(document.namespace(key).get(&key.key()).cloned())
    }

    async fn put(&self, key: &CharacterKey, character: &Character) -> Result<(), RepoError> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        document
            .namespace_mut(key)
            .insert(key.key(), character.clone());
        self.save(&document).await
    }

    async fn delete(&self, key: &CharacterKey) -> Result<bool, RepoError> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let removed = document.namespace_mut(key).remove(&key.key()).is_some();
        if removed {
            self.save(&document).await?;
        }
        Ok(removed)
    }

    async fn list_players(&self) -> Result<Vec<(PlayerId, Character)>, RepoError> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(document
            .players
            .into_iter()
            .map(|(id, character)| (PlayerId::new(id), character))
            .collect())
    }
}
