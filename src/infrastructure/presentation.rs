//! Plain-text replies for command outcomes and errors

use std::fmt::Write;

use crate::application::dto::{CommandOutcome, SheetEntryKind};
use crate::domain::entities::Character;
use crate::domain::services::{CheckOutcome, SpecialMoveResult};
use crate::domain::value_objects::Patent;
use crate::domain::EngineError;

const COMMANDS: &[(&str, &str)] = &[
    (
        "create_character <name> <sign> <patent> <str> <agi> <cos> <wil>",
        "Create your sheet",
    ),
    ("sheet", "Show your sheet"),
    ("add_talent <name> / remove_talent <name>", "Edit talents"),
    ("add_move <name> / remove_move <name>", "Edit special moves"),
    ("update_hp <value>", "Set current hit points"),
    ("roll <attribute> [description]", "Attribute check"),
    ("initiative", "Initiative check"),
    ("attack_physical <target>", "Physical attack on an NPC id or @player"),
    ("special_move <move name> <target>", "Special move (not for Aspirants)"),
    ("add_xp <values...>", "Add experience"),
    ("calc_master_xp", "Weekly master and gold awards"),
    (
        "create_npc <id> <name> <patent> <str> <agi> <cos> <wil>",
        "Create an NPC",
    ),
    ("npc <id> / delete_npc <id>", "Show or remove an NPC"),
];

pub fn help_text(prefix: &str) -> String {
    let mut text = String::from("CosmoBot commands\n");
    for (usage, description) in COMMANDS {
        let _ = writeln!(text, "{}{} - {}", prefix, usage, description);
    }
    let patents: Vec<&str> = Patent::ALL.iter().map(|p| p.name()).collect();
    let _ = writeln!(text, "Patents: {}", patents.join(", "));
    text
}

fn sheet_text(title: &str, character: &Character) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}", title);
    if let Some(sign) = &character.sign {
        let _ = writeln!(text, "Sign: {}", sign);
    }
    let _ = writeln!(text, "Patent: {}", character.patent);
    let _ = writeln!(
        text,
        "Attributes: STR {} | AGI {} | COS {} | WIL {}",
        character.strength, character.agility, character.cosmos, character.will
    );
    let _ = writeln!(
        text,
        "HP / XP: {} / {}",
        character.hit_points, character.experience
    );
    let _ = writeln!(text, "Talents: {}", list_or_none(&character.talents));
    let _ = write!(text, "Special moves: {}", list_or_none(&character.special_moves));
    text
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn entry_label(kind: SheetEntryKind) -> &'static str {
    match kind {
        SheetEntryKind::Talent => "Talent",
        SheetEntryKind::SpecialMove => "Special move",
    }
}

/// Render an outcome as the reply posted back to the channel
pub fn render(outcome: &CommandOutcome, prefix: &str) -> String {
    match outcome {
        CommandOutcome::Help => help_text(prefix),
        CommandOutcome::CharacterCreated(character) => sheet_text(
            &format!("Character {} created! Starting HP {}", character.name, character.hit_points),
            character,
        ),
        CommandOutcome::Sheet(character) => sheet_text(&format!("Sheet of {}", character.name), character),
        CommandOutcome::EntryAdded { kind, name } => {
            format!("{} '{}' added.", entry_label(*kind), name)
        }
        CommandOutcome::EntryRemoved { kind, name } => {
            format!("{} '{}' removed.", entry_label(*kind), name)
        }
        CommandOutcome::HitPointsUpdated {
            character,
            hit_points,
        } => format!("{} now has {} HP.", character, hit_points),
        CommandOutcome::Roll(outcome) => {
            let roll = &outcome.roll;
            let mut text = format!(
                "{} - {}: d{} ({}) + {} {} = {}",
                outcome.character,
                outcome.description,
                roll.die_size,
                roll.draw,
                roll.attribute.abbreviation(),
                roll.modifier,
                roll.total
            );
            match roll.outcome {
                CheckOutcome::Critical => text.push_str("\nCritical success!"),
                CheckOutcome::Fumble => text.push_str("\nCritical failure!"),
                CheckOutcome::Normal => {}
            }
            text
        }
        CommandOutcome::Initiative(outcome) => format!(
            "{} initiative: d{} ({}) + WIL {} = {}",
            outcome.character,
            outcome.roll.die_size,
            outcome.roll.draw,
            outcome.roll.will,
            outcome.roll.total
        ),
        CommandOutcome::Attack(outcome) => {
            let report = &outcome.report;
            if report.hit {
                format!(
                    "{} hits {}! Hit {} vs AGI {}. Damage {} - {} mitigation = {}. {} has {} HP left.",
                    outcome.attacker,
                    outcome.defender,
                    report.hit_roll,
                    report.defender_agility,
                    report.damage_roll,
                    report.mitigation,
                    report.final_damage,
                    outcome.defender,
                    report.defender_hit_points
                )
            } else {
                format!(
                    "{} misses {}. Hit {} vs AGI {}.",
                    outcome.attacker, outcome.defender, report.hit_roll, report.defender_agility
                )
            }
        }
        CommandOutcome::SpecialMove(outcome) => {
            let report = &outcome.report;
            let header = format!(
                "{} uses {} on {}! Will {} vs DC {}.",
                outcome.attacker,
                outcome.move_name,
                outcome.defender,
                report.will_test,
                report.difficulty
            );
            match &report.result {
                SpecialMoveResult::Success {
                    damage_dice,
                    raw_damage,
                    mitigation,
                    final_damage,
                    defender_hit_points,
                } => format!(
                    "{}\nSuccess! Dice {:?}, damage {} - {} mitigation = {}. {} has {} HP left.",
                    header,
                    damage_dice,
                    raw_damage,
                    mitigation,
                    final_damage,
                    outcome.defender,
                    defender_hit_points
                ),
                SpecialMoveResult::Failure { weak_damage } => format!(
                    "{}\nThe move falters, only {} weak damage.",
                    header, weak_damage
                ),
            }
        }
        CommandOutcome::ExperienceAdded(grant) => {
            let mut text = format!(
                "{} gained {} XP. Total: {}",
                grant.character, grant.added, grant.total
            );
            if grant.clamped {
                text.push_str(" (limited to 0-150)");
            }
            text
        }
        CommandOutcome::MasterExperience(awards) => format!(
            "Weekly experience\nPlayer average: {:.1} ({} players)\nMaster: {}\nGold knight: {}",
            awards.average, awards.players, awards.master, awards.gold
        ),
        CommandOutcome::NpcCreated { id, npc } => {
            sheet_text(&format!("NPC #{} {} created!", id, npc.name), npc)
        }
        CommandOutcome::Npc { id, npc } => sheet_text(&format!("NPC #{} {}", id, npc.name), npc),
        CommandOutcome::NpcDeleted(id) => format!("NPC #{} deleted.", id),
    }
}

/// Render a failed command as the reply posted back to the channel
pub fn render_error(error: &EngineError, prefix: &str) -> String {
    match error {
        EngineError::NotFound(what) if what.starts_with("character sheet for player") => format!(
            "You don't have a character yet! Use {}create_character first.",
            prefix
        ),
        EngineError::UnknownCommand(name) => format!(
            "Unknown command '{}'. Use {}help to see the commands.",
            name, prefix
        ),
        EngineError::Storage(_) => "Something went wrong saving the data, try again.".to_string(),
        other => format!("Error: {}", other),
    }
}
