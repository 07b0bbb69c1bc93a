//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: JSON file, SQLite and in-memory character stores
//! - HTTP: command endpoint and sheet routes
//! - Presentation: plain-text replies
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod persistence;
pub mod presentation;
pub mod random_adapter;
pub mod state;
