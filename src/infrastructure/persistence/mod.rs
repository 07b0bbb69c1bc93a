//! Character store adapters
//!
//! Implementations of the character repository port: the JSON data document
//! the bot has always used, an embedded SQLite store, and an in-memory map.

mod json_file_repository;
mod memory_repository;
mod sqlite_repository;

pub use json_file_repository::JsonFileCharacterRepository;
pub use memory_repository::InMemoryCharacterRepository;
pub use sqlite_repository::SqliteCharacterRepository;
