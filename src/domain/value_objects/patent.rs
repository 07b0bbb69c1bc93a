//! Patent rank table
//!
//! A patent is a knight's rank tier. It fixes the die a character rolls for
//! checks, the flat mitigation subtracted from damage it takes, and how many
//! d4 its special moves throw. Tiers are strictly ordered; the ordinal scales
//! the difficulty of special moves aimed at a character.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::EngineError;

/// Character rank tier, from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Patent {
    #[serde(alias = "Aspirante")]
    Aspirant,
    Bronze,
    #[serde(alias = "Prata")]
    Silver,
    #[serde(alias = "Ouro")]
    Gold,
    #[serde(alias = "Semideus")]
    Demigod,
    #[serde(alias = "Divindade")]
    Divinity,
}

impl Patent {
    /// Every tier in canonical order
    pub const ALL: [Patent; 6] = [
        Patent::Aspirant,
        Patent::Bronze,
        Patent::Silver,
        Patent::Gold,
        Patent::Demigod,
        Patent::Divinity,
    ];

    /// Position in the canonical ordering, starting at 0 for Aspirant
    pub fn rank_index(self) -> u32 {
        match self {
            Patent::Aspirant => 0,
            Patent::Bronze => 1,
            Patent::Silver => 2,
            Patent::Gold => 3,
            Patent::Demigod => 4,
            Patent::Divinity => 5,
        }
    }

    /// Number of faces on the check die
    pub fn die_size(self) -> u32 {
        match self {
            Patent::Aspirant => 4,
            Patent::Bronze => 6,
            Patent::Silver => 8,
            Patent::Gold => 10,
            Patent::Demigod => 12,
            Patent::Divinity => 20,
        }
    }

    /// Flat reduction applied to incoming damage
    pub fn mitigation(self) -> u32 {
        match self {
            Patent::Aspirant => 0,
            Patent::Bronze => 2,
            Patent::Silver => 4,
            Patent::Gold => 6,
            Patent::Demigod => 8,
            Patent::Divinity => 10,
        }
    }

    /// How many d4 a successful special move throws; Aspirants have none
    pub fn special_move_dice(self) -> Option<u32> {
        match self {
            Patent::Aspirant => None,
            Patent::Bronze => Some(2),
            Patent::Silver | Patent::Gold => Some(3),
            Patent::Demigod => Some(4),
            Patent::Divinity => Some(5),
        }
    }

    /// Threshold a will test must reach to land a special move on this tier
    pub fn special_move_difficulty(self) -> u32 {
        10 + 2 * self.rank_index()
    }

    pub fn name(self) -> &'static str {
        match self {
            Patent::Aspirant => "Aspirant",
            Patent::Bronze => "Bronze",
            Patent::Silver => "Silver",
            Patent::Gold => "Gold",
            Patent::Demigod => "Demigod",
            Patent::Divinity => "Divinity",
        }
    }
}

impl fmt::Display for Patent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Patent {
    type Err = EngineError;

    /// Case-insensitive; the Portuguese tier names are accepted as well
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aspirant" | "aspirante" => Ok(Patent::Aspirant),
            "bronze" => Ok(Patent::Bronze),
            "silver" | "prata" => Ok(Patent::Silver),
            "gold" | "ouro" => Ok(Patent::Gold),
            "demigod" | "semideus" => Ok(Patent::Demigod),
            "divinity" | "divindade" => Ok(Patent::Divinity),
            _ => Err(EngineError::InvalidPatent(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        let dice: Vec<u32> = Patent::ALL.iter().map(|p| p.die_size()).collect();
        assert_eq!(dice, vec![4, 6, 8, 10, 12, 20]);

        let mitigation: Vec<u32> = Patent::ALL.iter().map(|p| p.mitigation()).collect();
        assert_eq!(mitigation, vec![0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_ordering_matches_rank_index() {
        for window in Patent::ALL.windows(2) {
            assert!(window[0] < window[1]);
            assert_eq!(window[0].rank_index() + 1, window[1].rank_index());
        }
    }

    #[test]
    fn test_special_move_difficulty() {
        assert_eq!(Patent::Aspirant.special_move_difficulty(), 10);
        assert_eq!(Patent::Bronze.special_move_difficulty(), 12);
        assert_eq!(Patent::Divinity.special_move_difficulty(), 20);
    }

    #[test]
    fn test_special_move_dice() {
        assert_eq!(Patent::Aspirant.special_move_dice(), None);
        assert_eq!(Patent::Bronze.special_move_dice(), Some(2));
        assert_eq!(Patent::Silver.special_move_dice(), Some(3));
        assert_eq!(Patent::Gold.special_move_dice(), Some(3));
        assert_eq!(Patent::Demigod.special_move_dice(), Some(4));
        assert_eq!(Patent::Divinity.special_move_dice(), Some(5));
    }

    #[test]
    fn test_parse_accepts_aliases() {
        assert_eq!("gold".parse::<Patent>().unwrap(), Patent::Gold);
        assert_eq!("Prata".parse::<Patent>().unwrap(), Patent::Silver);
        assert_eq!("ASPIRANTE".parse::<Patent>().unwrap(), Patent::Aspirant);
        assert!(matches!(
            "Platinum".parse::<Patent>(),
            Err(EngineError::InvalidPatent(name)) if name == "Platinum"
        ));
    }

    #[test]
    fn test_deserialize_legacy_name() {
        let patent: Patent = serde_json::from_str("\"Semideus\"").unwrap();
        assert_eq!(patent, Patent::Demigod);
        assert_eq!(serde_json::to_string(&patent).unwrap(), "\"Demigod\"");
    }
}
