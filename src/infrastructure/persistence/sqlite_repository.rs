//! SQLite character store
//!
//! One row per record, keyed by namespace and id, with the sheet stored as
//! its JSON document.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::application::ports::outbound::{CharacterRepositoryPort, RepoError};
use crate::domain::entities::Character;
use crate::domain::value_objects::{CharacterKey, PlayerId, PLAYERS_NAMESPACE};

pub struct SqliteCharacterRepository {
    pool: SqlitePool,
}

impl SqliteCharacterRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                kind TEXT NOT NULL,
                key TEXT NOT NULL,
                data TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (kind, key)
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Open (creating if needed) the database at `url`
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Self::new(pool).await
    }
}

fn decode(data: &str) -> Result<Character, RepoError> {
    serde_json::from_str(data).map_err(|e| RepoError::Serialization(e.to_string()))
}

#[async_trait]
impl CharacterRepositoryPort for SqliteCharacterRepository {
    async fn get(&self, key: &CharacterKey) -> Result<Option<Character>, RepoError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT data FROM characters WHERE kind = ? AND key = ?")
                .bind(key.namespace())
                .bind(key.key())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(|(data,)| decode(&data)).transpose()
    }

    async fn put(&self, key: &CharacterKey, character: &Character) -> Result<(), RepoError> {
        let data = serde_json::to_string(character)
            .map_err(|e| RepoError::Serialization(e.to_string()))?;

        sqlx::query(
            "INSERT OR REPLACE INTO characters (kind, key, data, updated_at) VALUES (?, ?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(key.namespace())
        .bind(key.key())
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &CharacterKey) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE kind = ? AND key = ?")
            .bind(key.namespace())
            .bind(key.key())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_players(&self) -> Result<Vec<(PlayerId, Character)>, RepoError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, data FROM characters WHERE kind = ? ORDER BY key")
                .bind(PLAYERS_NAMESPACE)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|(id, data)| Ok((PlayerId::new(id), decode(&data)?)))
            .collect()
    }
}
