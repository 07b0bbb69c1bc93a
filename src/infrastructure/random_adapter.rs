//! Thread-local RNG adapter for the dice roller port

use rand::Rng;

use crate::domain::services::DiceRoller;

/// Production dice backed by `rand::thread_rng()`
#[derive(Debug, Clone, Default)]
pub struct ThreadRngDice;

impl ThreadRngDice {
    pub fn new() -> Self {
        Self
    }
}

impl DiceRoller for ThreadRngDice {
    fn roll(&self, sides: u32) -> u32 {
        rand::thread_rng().gen_range(1..=sides.max(1))
    }
}
