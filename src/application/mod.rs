//! Application layer - Use cases and the ports they depend on
//!
//! This layer contains:
//! - Ports: Interfaces to the character store
//! - Services: Sheet management, combat and experience use cases
//! - DTOs: Parsed commands and structured command outcomes

pub mod dto;
pub mod ports;
pub mod services;
