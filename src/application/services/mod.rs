//! Application services - Use case implementations
//!
//! Each service loads sheets through the repository port, runs the domain
//! rules, and puts mutated sheets back. Every load→compute→save cycle that
//! writes runs under the shared [`WriteGate`], so concurrent commands cannot
//! lose each other's updates.

pub mod character_service;
pub mod combat_service;
pub mod command_service;
pub mod experience_service;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use character_service::{CharacterService, CharacterServiceImpl};
pub use combat_service::CombatService;
pub use command_service::CommandService;
pub use experience_service::ExperienceService;

/// Single-writer lock shared by every service that mutates sheets
pub type WriteGate = Arc<Mutex<()>>;

pub fn new_write_gate() -> WriteGate {
    Arc::new(Mutex::new(()))
}
