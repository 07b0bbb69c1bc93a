//! Check and combat resolution
//!
//! Checks roll the patent die of the acting character and add an attribute.
//! Damage always passes through the defender's mitigation and can never go
//! below zero, nor push hit points below zero.

use serde::Serialize;

use crate::domain::entities::Character;
use crate::domain::services::DiceRoller;
use crate::domain::value_objects::Attribute;
use crate::domain::EngineError;

/// Faces of the damage die used by physical attacks and special moves
pub const DAMAGE_DIE: u32 = 4;

/// Narrative classification of a check die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The die showed its highest face
    Critical,
    /// The die showed a one
    Fumble,
    Normal,
}

impl CheckOutcome {
    fn classify(draw: u32, die_size: u32) -> Self {
        if draw == die_size {
            CheckOutcome::Critical
        } else if draw == 1 {
            CheckOutcome::Fumble
        } else {
            CheckOutcome::Normal
        }
    }
}

/// Result of an attribute check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRoll {
    pub attribute: Attribute,
    pub die_size: u32,
    pub draw: u32,
    pub modifier: u32,
    pub total: u32,
    pub outcome: CheckOutcome,
}

/// Result of an initiative check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitiativeRoll {
    pub die_size: u32,
    pub draw: u32,
    pub will: u32,
    pub total: u32,
}

/// Result of a physical attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhysicalAttackReport {
    pub hit: bool,
    pub hit_roll: u32,
    pub defender_agility: u32,
    pub damage_roll: u32,
    pub mitigation: u32,
    pub final_damage: u32,
    pub defender_hit_points: u32,
}

/// How a special move played out once the will test was rolled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SpecialMoveResult {
    Success {
        damage_dice: Vec<u32>,
        raw_damage: u32,
        mitigation: u32,
        final_damage: u32,
        defender_hit_points: u32,
    },
    /// Nothing is applied; the weak damage is for narration only
    Failure { weak_damage: u32 },
}

/// Result of a special move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialMoveReport {
    pub will_test: u32,
    pub difficulty: u32,
    #[serde(flatten)]
    pub result: SpecialMoveResult,
}

impl SpecialMoveReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.result, SpecialMoveResult::Success { .. })
    }
}

/// Roll the character's patent die and add one attribute
pub fn attribute_check(
    dice: &dyn DiceRoller,
    character: &Character,
    attribute: Attribute,
) -> CheckRoll {
    let die_size = character.patent.die_size();
    let draw = dice.roll(die_size);
    let modifier = character.attribute(attribute);

    CheckRoll {
        attribute,
        die_size,
        draw,
        modifier,
        total: draw.saturating_add(modifier),
        outcome: CheckOutcome::classify(draw, die_size),
    }
}

/// Roll the character's patent die and add will
pub fn initiative_check(dice: &dyn DiceRoller, character: &Character) -> InitiativeRoll {
    let die_size = character.patent.die_size();
    let draw = dice.roll(die_size);

    InitiativeRoll {
        die_size,
        draw,
        will: character.will,
        total: draw.saturating_add(character.will),
    }
}

/// Resolve a physical attack, applying damage to `defender` on a hit
///
/// The attack lands when the hit roll meets or beats the defender's agility.
pub fn physical_attack(
    dice: &dyn DiceRoller,
    attacker: &Character,
    defender: &mut Character,
) -> PhysicalAttackReport {
    let hit_roll = dice
        .roll(attacker.patent.die_size())
        .saturating_add(attacker.agility);
    let damage_roll = dice.roll(DAMAGE_DIE).saturating_add(attacker.strength);
    let mitigation = defender.patent.mitigation();
    let hit = hit_roll >= defender.agility;

    let final_damage = if hit {
        damage_roll.saturating_sub(mitigation)
    } else {
        0
    };
    if hit {
        defender.take_damage(final_damage);
    }

    PhysicalAttackReport {
        hit,
        hit_roll,
        defender_agility: defender.agility,
        damage_roll,
        mitigation,
        final_damage,
        defender_hit_points: defender.hit_points,
    }
}

/// Resolve a special move, applying damage to `defender` on success
///
/// Aspirants cannot use special moves. The will test must reach
/// `10 + 2 * rank_index(defender.patent)`.
pub fn special_move(
    dice: &dyn DiceRoller,
    attacker: &Character,
    defender: &mut Character,
) -> Result<SpecialMoveReport, EngineError> {
    let dice_count = attacker.patent.special_move_dice().ok_or_else(|| {
        EngineError::ForbiddenAction("Aspirants cannot use special moves".to_string())
    })?;

    let will_test = dice
        .roll(attacker.patent.die_size())
        .saturating_add(attacker.will);
    let difficulty = defender.patent.special_move_difficulty();

    let result = if will_test >= difficulty {
        let damage_dice = dice.roll_many(dice_count, DAMAGE_DIE);
        let raw_damage = damage_dice
            .iter()
            .fold(attacker.cosmos, |total, die| total.saturating_add(*die))
            .saturating_add(attacker.cosmos / 3);
        let mitigation = defender.patent.mitigation();
        let final_damage = raw_damage.saturating_sub(mitigation);
        let defender_hit_points = defender.take_damage(final_damage);

        SpecialMoveResult::Success {
            damage_dice,
            raw_damage,
            mitigation,
            final_damage,
            defender_hit_points,
        }
    } else {
        SpecialMoveResult::Failure {
            weak_damage: attacker.cosmos / 2,
        }
    };

    Ok(SpecialMoveReport {
        will_test,
        difficulty,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewCharacter;
    use crate::domain::services::dice::testing::ScriptedDice;
    use crate::domain::value_objects::{NpcId, Patent};

    fn knight(patent: Patent, strength: u32, agility: u32, cosmos: u32, will: u32) -> Character {
        Character::create(NewCharacter {
            name: "Hyoga".to_string(),
            sign: Some("Cygnus".to_string()),
            patent,
            strength,
            agility,
            cosmos,
            will,
        })
        .unwrap()
    }

    #[test]
    fn test_attribute_check_adds_attribute() {
        let character = knight(Patent::Bronze, 2, 3, 4, 1);
        let dice = ScriptedDice::new([3]);

        let roll = attribute_check(&dice, &character, Attribute::Cosmos);

        assert_eq!(roll.die_size, 6);
        assert_eq!(roll.total, 7);
        assert_eq!(roll.outcome, CheckOutcome::Normal);
    }

    #[test]
    fn test_attribute_check_critical_and_fumble() {
        let character = knight(Patent::Gold, 2, 3, 4, 1);

        let critical = attribute_check(&ScriptedDice::new([10]), &character, Attribute::Will);
        assert_eq!(critical.outcome, CheckOutcome::Critical);
        assert_eq!(critical.total, 11);

        let fumble = attribute_check(&ScriptedDice::new([1]), &character, Attribute::Will);
        assert_eq!(fumble.outcome, CheckOutcome::Fumble);
    }

    #[test]
    fn test_initiative_uses_will() {
        let character = knight(Patent::Silver, 1, 1, 1, 4);
        let roll = initiative_check(&ScriptedDice::new([8]), &character);
        assert_eq!(roll.die_size, 8);
        assert_eq!(roll.total, 12);
    }

    #[test]
    fn test_physical_attack_tie_is_a_hit() {
        // Aspirant d4: draw 2 + agility 3 = 5 against default agility 5
        let attacker = knight(Patent::Aspirant, 3, 3, 2, 2);
        let mut defender = Character::default_npc(NpcId::new(1));
        let dice = ScriptedDice::new([2, 4]);

        let report = physical_attack(&dice, &attacker, &mut defender);

        assert!(report.hit);
        assert_eq!(report.hit_roll, 5);
        assert_eq!(report.damage_roll, 7);
        assert_eq!(report.mitigation, 2);
        assert_eq!(report.final_damage, 5);
        assert_eq!(defender.hit_points, 15);
        assert_eq!(report.defender_hit_points, 15);
    }

    #[test]
    fn test_physical_attack_miss_leaves_defender_untouched() {
        let attacker = knight(Patent::Aspirant, 3, 3, 2, 2);
        let mut defender = Character::default_npc(NpcId::new(1));
        let before = defender.clone();

        let report = physical_attack(&ScriptedDice::new([1, 4]), &attacker, &mut defender);

        assert!(!report.hit);
        assert_eq!(report.final_damage, 0);
        assert_eq!(defender, before);
    }

    #[test]
    fn test_physical_attack_damage_never_negative() {
        let attacker = knight(Patent::Bronze, 0, 10, 0, 0);
        let mut defender = knight(Patent::Divinity, 10, 1, 10, 10);
        let hp = defender.hit_points;

        let report = physical_attack(&ScriptedDice::new([1, 1]), &attacker, &mut defender);

        assert!(report.hit);
        assert_eq!(report.final_damage, 0);
        assert_eq!(defender.hit_points, hp);
    }

    #[test]
    fn test_special_move_forbidden_for_aspirant() {
        let attacker = knight(Patent::Aspirant, 3, 3, 2, 2);
        let mut defender = Character::default_npc(NpcId::new(1));
        let dice = ScriptedDice::new([4]);

        let result = special_move(&dice, &attacker, &mut defender);

        assert!(matches!(result, Err(EngineError::ForbiddenAction(_))));
        // nothing was rolled
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn test_special_move_success_applies_mitigated_damage() {
        // Silver d8: 6 + will 6 = 12 vs Bronze DC 12
        let attacker = knight(Patent::Silver, 2, 2, 7, 6);
        let mut defender = Character::default_npc(NpcId::new(3));
        let dice = ScriptedDice::new([6, 4, 3, 2]);

        let report = special_move(&dice, &attacker, &mut defender).unwrap();

        assert_eq!(report.difficulty, 12);
        assert!(report.succeeded());
        // 4 + 3 + 2 + cosmos 7 + 7 / 3 = 18, minus Bronze 2
        match report.result {
            SpecialMoveResult::Success {
                raw_damage,
                final_damage,
                defender_hit_points,
                ref damage_dice,
                ..
            } => {
                assert_eq!(damage_dice, &vec![4, 3, 2]);
                assert_eq!(raw_damage, 18);
                assert_eq!(final_damage, 16);
                assert_eq!(defender_hit_points, 4);
            }
            SpecialMoveResult::Failure { .. } => panic!("Expected success"),
        }
        assert_eq!(defender.hit_points, 4);
    }

    #[test]
    fn test_special_move_failure_reports_weak_damage() {
        let attacker = knight(Patent::Bronze, 2, 2, 5, 1);
        let mut defender = knight(Patent::Gold, 2, 2, 5, 1);
        let before = defender.clone();

        let report = special_move(&ScriptedDice::new([6]), &attacker, &mut defender).unwrap();

        assert_eq!(report.difficulty, 16);
        assert_eq!(report.will_test, 7);
        assert_eq!(report.result, SpecialMoveResult::Failure { weak_damage: 2 });
        assert_eq!(defender, before);
    }

    #[test]
    fn test_special_move_damage_floors_hit_points() {
        let attacker = knight(Patent::Divinity, 1, 1, 12, 10);
        let mut defender = Character::default_npc(NpcId::new(9));
        let dice = ScriptedDice::new([20, 4, 4, 4, 4, 4]);

        special_move(&dice, &attacker, &mut defender).unwrap();

        assert_eq!(defender.hit_points, 0);
    }

    #[test]
    fn test_stored_extreme_attributes_saturate() {
        let mut attacker = Character::default_npc(NpcId::new(0));
        attacker.patent = Patent::Gold;
        attacker.strength = u32::MAX;
        attacker.agility = u32::MAX;
        attacker.cosmos = u32::MAX;
        attacker.will = u32::MAX;

        let roll = attribute_check(&ScriptedDice::new([10]), &attacker, Attribute::Strength);
        assert_eq!(roll.total, u32::MAX);
        assert_eq!(initiative_check(&ScriptedDice::new([10]), &attacker).total, u32::MAX);

        let mut defender = Character::default_npc(NpcId::new(1));
        let report = physical_attack(&ScriptedDice::new([10, 4]), &attacker, &mut defender);
        assert_eq!(report.hit_roll, u32::MAX);
        assert_eq!(report.damage_roll, u32::MAX);
        assert_eq!(report.defender_hit_points, 0);

        let mut defender = Character::default_npc(NpcId::new(2));
        let report =
            special_move(&ScriptedDice::new([10, 4, 4, 4]), &attacker, &mut defender).unwrap();
        assert_eq!(report.will_test, u32::MAX);
        assert!(matches!(
            report.result,
            SpecialMoveResult::Success { raw_damage, defender_hit_points: 0, .. } if raw_damage == u32::MAX
        ));
    }
}
