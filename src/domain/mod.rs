//! Domain layer - Core game rules with no external dependencies
//!
//! This layer contains:
//! - Entities: Character sheets for players and NPCs
//! - Value Objects: Patent rank table, attributes, identities
//! - Domain Services: Dice resolution and experience rules
//! - Errors: The typed failures every rule can signal

pub mod entities;
pub mod error;
pub mod services;
pub mod value_objects;

pub use error::EngineError;
