//! Domain entities - Core business objects with identity

mod character;

pub use character::{
    Character, NewCharacter, ASPIRANT_ATTRIBUTE_CAP, DEFAULT_NPC_AGILITY, DEFAULT_NPC_HIT_POINTS,
    MAX_ATTRIBUTE_VALUE, MAX_EXPERIENCE,
};
