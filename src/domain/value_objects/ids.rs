//! Identities for stored characters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque caller identity that owns a player sheet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integer id chosen by the game master when creating an NPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NpcId(i64);

impl NpcId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NpcId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Store namespace holding player sheets
pub const PLAYERS_NAMESPACE: &str = "players";

/// Store namespace holding NPC sheets
pub const NPCS_NAMESPACE: &str = "npcs";

/// Address of a single record in the character store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CharacterKey {
    Player(PlayerId),
    Npc(NpcId),
}

impl CharacterKey {
    /// Namespace the record lives in (`players` or `npcs`)
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Player(_) => PLAYERS_NAMESPACE,
            Self::Npc(_) => NPCS_NAMESPACE,
        }
    }

    /// Key of the record inside its namespace
    pub fn key(&self) -> String {
        match self {
            Self::Player(id) => id.as_str().to_string(),
            Self::Npc(id) => id.value().to_string(),
        }
    }
}

impl fmt::Display for CharacterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player(id) => write!(f, "player {}", id),
            Self::Npc(id) => write!(f, "NPC #{}", id),
        }
    }
}
