//! Data Transfer Objects - Commands coming in and outcomes going out

mod command;
mod outcome;

pub use command::{Command, TargetRef, DEFAULT_ROLL_DESCRIPTION};
pub use outcome::{
    AttackOutcome, CommandOutcome, ExperienceGrant, InitiativeOutcome, RollOutcome,
    SheetEntryKind, SpecialMoveOutcome,
};
