//! Structured results of executed commands

use serde::Serialize;

use crate::domain::entities::Character;
use crate::domain::services::{
    CheckRoll, InitiativeRoll, MasterExperience, PhysicalAttackReport, SpecialMoveReport,
};
use crate::domain::value_objects::NpcId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetEntryKind {
    Talent,
    SpecialMove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollOutcome {
    pub character: String,
    pub description: String,
    pub roll: CheckRoll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitiativeOutcome {
    pub character: String,
    pub roll: InitiativeRoll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackOutcome {
    pub attacker: String,
    pub defender: String,
    pub report: PhysicalAttackReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialMoveOutcome {
    pub attacker: String,
    pub move_name: String,
    pub defender: String,
    pub report: SpecialMoveReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceGrant {
    pub character: String,
    pub added: i64,
    pub total: u32,
    /// The total hit the 0..=150 bounds and was clamped
    pub clamped: bool,
}

/// Everything a command can produce, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum CommandOutcome {
    Help,
    CharacterCreated(Character),
    Sheet(Character),
    EntryAdded {
        kind: SheetEntryKind,
        name: String,
    },
    EntryRemoved {
        kind: SheetEntryKind,
        name: String,
    },
    HitPointsUpdated {
        character: String,
        hit_points: u32,
    },
    Roll(RollOutcome),
    Initiative(InitiativeOutcome),
    Attack(AttackOutcome),
    SpecialMove(SpecialMoveOutcome),
    ExperienceAdded(ExperienceGrant),
    MasterExperience(MasterExperience),
    NpcCreated {
        id: NpcId,
        npc: Character,
    },
    Npc {
        id: NpcId,
        npc: Character,
    },
    NpcDeleted(NpcId),
}
