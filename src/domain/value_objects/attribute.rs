//! Character attributes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::EngineError;

/// One of the four attributes on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Agility,
    Cosmos,
    Will,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Strength,
        Attribute::Agility,
        Attribute::Cosmos,
        Attribute::Will,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            Attribute::Strength => "STR",
            Attribute::Agility => "AGI",
            Attribute::Cosmos => "COS",
            Attribute::Will => "WIL",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Attribute {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "str" | "for" | "forca" | "força" => Ok(Attribute::Strength),
            "agility" | "agi" => Ok(Attribute::Agility),
            "cosmos" | "cos" => Ok(Attribute::Cosmos),
            "will" | "wil" | "von" | "vontade" => Ok(Attribute::Will),
            _ => Err(EngineError::InvalidAttribute(s.to_string())),
        }
    }
}
