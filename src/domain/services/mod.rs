//! Domain services - Pure rule computations
//!
//! Every function here works on sheets handed in by the caller and draws
//! randomness only through [`DiceRoller`]. Persisting a mutated defender is
//! the caller's job.

pub mod combat;
pub mod dice;
pub mod experience;

pub use combat::{
    attribute_check, initiative_check, physical_attack, special_move, CheckOutcome, CheckRoll,
    InitiativeRoll, PhysicalAttackReport, SpecialMoveReport, SpecialMoveResult,
};
pub use dice::DiceRoller;
pub use experience::{master_experience, parse_experience_deltas, MasterExperience};
