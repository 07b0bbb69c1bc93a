//! Dice roller abstraction

/// Source of uniformly distributed die results
pub trait DiceRoller: Send + Sync {
    /// Roll one die with `sides` faces, returning a value in `1..=sides`
    fn roll(&self, sides: u32) -> u32;

    /// Roll `count` dice with `sides` faces each
    fn roll_many(&self, count: u32, sides: u32) -> Vec<u32> {
        (0..count).map(|_| self.roll(sides)).collect()
    }
}
