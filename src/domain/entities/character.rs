//! Character entity - Player and NPC sheets
//!
//! Players and NPCs share one sheet shape. The store addresses them
//! differently (caller identity vs. integer id) but the rules treat them
//! alike. Sheets written by older versions of the bot use short Portuguese
//! keys, accepted here as serde aliases.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Attribute, NpcId, Patent};
use crate::domain::EngineError;

/// Highest experience a character can hold
pub const MAX_EXPERIENCE: u32 = 150;

/// Attribute points an Aspirant may distribute at creation
pub const ASPIRANT_ATTRIBUTE_CAP: u32 = 10;

/// Highest value a single attribute may start at
pub const MAX_ATTRIBUTE_VALUE: u32 = 100;

/// Agility of an NPC that was never created
pub const DEFAULT_NPC_AGILITY: u32 = 5;

/// Hit points of an NPC that was never created
pub const DEFAULT_NPC_HIT_POINTS: u32 = 20;

fn default_patent() -> Patent {
    Patent::Bronze
}

fn default_agility() -> u32 {
    DEFAULT_NPC_AGILITY
}

fn default_hit_points() -> u32 {
    DEFAULT_NPC_HIT_POINTS
}

/// A character sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default)]
    pub name: String,
    /// Zodiac sign, flavor text for players
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
    #[serde(default = "default_patent")]
    pub patent: Patent,
    #[serde(default, alias = "for")]
    pub strength: u32,
    #[serde(default = "default_agility", alias = "agi")]
    pub agility: u32,
    #[serde(default, alias = "cos")]
    pub cosmos: u32,
    #[serde(default, alias = "von")]
    pub will: u32,
    #[serde(default = "default_hit_points", alias = "pv")]
    pub hit_points: u32,
    #[serde(default, alias = "xp")]
    pub experience: u32,
    #[serde(default)]
    pub talents: Vec<String>,
    #[serde(default, alias = "special_moves")]
    pub special_moves: Vec<String>,
}

/// Input for creating a sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharacter {
    pub name: String,
    pub sign: Option<String>,
    pub patent: Patent,
    pub strength: u32,
    pub agility: u32,
    pub cosmos: u32,
    pub will: u32,
}

impl NewCharacter {
    pub fn attribute(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Cosmos => self.cosmos,
            Attribute::Will => self.will,
        }
    }
}

impl Character {
    /// Build a fresh sheet, enforcing the Aspirant point cap
    ///
    /// Starting hit points are `round((strength + cosmos) * 1.8)`.
    pub fn create(sheet: NewCharacter) -> Result<Self, EngineError> {
        if sheet.name.trim().is_empty() {
            return Err(EngineError::InvalidArgument(
                "character name cannot be empty".to_string(),
            ));
        }

        for attribute in Attribute::ALL {
            let value = sheet.attribute(attribute);
            if value > MAX_ATTRIBUTE_VALUE {
                return Err(EngineError::ConstraintViolation(format!(
                    "{} may be at most {} (got {})",
                    attribute, MAX_ATTRIBUTE_VALUE, value
                )));
            }
        }

        let total: u64 = Attribute::ALL
            .iter()
            .map(|attribute| u64::from(sheet.attribute(*attribute)))
            .sum();
        if sheet.patent == Patent::Aspirant && total > u64::from(ASPIRANT_ATTRIBUTE_CAP) {
            return Err(EngineError::ConstraintViolation(format!(
                "Aspirants may distribute at most {} attribute points (got {})",
                ASPIRANT_ATTRIBUTE_CAP, total
            )));
        }

        Ok(Self {
            hit_points: starting_hit_points(sheet.strength, sheet.cosmos),
            name: sheet.name,
            sign: sheet.sign,
            patent: sheet.patent,
            strength: sheet.strength,
            agility: sheet.agility,
            cosmos: sheet.cosmos,
            will: sheet.will,
            experience: 0,
            talents: Vec::new(),
            special_moves: Vec::new(),
        })
    }

    /// Stand-in defender for an NPC id that has no record
    pub fn default_npc(id: NpcId) -> Self {
        Self {
            name: format!("NPC #{}", id),
            sign: None,
            patent: Patent::Bronze,
            strength: 0,
            agility: DEFAULT_NPC_AGILITY,
            cosmos: 0,
            will: 0,
            hit_points: DEFAULT_NPC_HIT_POINTS,
            experience: 0,
            talents: Vec::new(),
            special_moves: Vec::new(),
        }
    }

    pub fn attribute(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Cosmos => self.cosmos,
            Attribute::Will => self.will,
        }
    }

    pub fn add_talent(&mut self, talent: impl Into<String>) -> Result<(), EngineError> {
        add_unique(&mut self.talents, talent.into(), "talent")
    }

    pub fn remove_talent(&mut self, talent: &str) -> Result<(), EngineError> {
        remove_entry(&mut self.talents, talent, "talent")
    }

    pub fn add_special_move(&mut self, special_move: impl Into<String>) -> Result<(), EngineError> {
        add_unique(&mut self.special_moves, special_move.into(), "special move")
    }

    pub fn remove_special_move(&mut self, special_move: &str) -> Result<(), EngineError> {
        remove_entry(&mut self.special_moves, special_move, "special move")
    }

    /// Subtract damage from hit points, never dropping below zero
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.hit_points = self.hit_points.saturating_sub(damage);
        self.hit_points
    }

    /// Add (or remove) experience, clamped to `[0, MAX_EXPERIENCE]`
    ///
    /// Returns whether the total had to be clamped.
    pub fn gain_experience(&mut self, delta: i64) -> bool {
        let raw = i64::from(self.experience).saturating_add(delta);
        let clamped = raw.clamp(0, i64::from(MAX_EXPERIENCE));
        // clamp keeps the value inside u32 range
        self.experience = clamped as u32;
        clamped != raw
    }
}

fn starting_hit_points(strength: u32, cosmos: u32) -> u32 {
    // (s + c) * 1.8 never lands on .5, so rounding up from .5 is exact
    let hit_points = ((u64::from(strength) + u64::from(cosmos)) * 18 + 5) / 10;
    u32::try_from(hit_points).unwrap_or(u32::MAX)
}

fn add_unique(entries: &mut Vec<String>, entry: String, kind: &str) -> Result<(), EngineError> {
    let entry = entry.trim().to_string();
    if entry.is_empty() {
        return Err(EngineError::InvalidArgument(format!("{} name cannot be empty", kind)));
    }
    if entries.iter().any(|existing| existing == &entry) {
        return Err(EngineError::ConstraintViolation(format!(
            "{} '{}' is already on the sheet",
            kind, entry
        )));
    }
    entries.push(entry);
    Ok(())
}

fn remove_entry(entries: &mut Vec<String>, entry: &str, kind: &str) -> Result<(), EngineError> {
    let entry = entry.trim();
    match entries.iter().position(|existing| existing == entry) {
        Some(pos) => {
            entries.remove(pos);
            Ok(())
        }
        None => Err(EngineError::NotFound(format!("{} '{}'", kind, entry))),
    }
}
