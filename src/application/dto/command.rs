//! Chat command parsing
//!
//! A command line is `<prefix><name> <args...>`. Free-text arguments such as
//! talent names or roll descriptions take the rest of the line verbatim.

use std::fmt;
use std::str::FromStr;

use crate::domain::entities::NewCharacter;
use crate::domain::value_objects::{Attribute, NpcId, Patent, PlayerId};
use crate::domain::EngineError;

/// Description used when a roll is made without one
pub const DEFAULT_ROLL_DESCRIPTION: &str = "Generic action";

/// Who an attack is aimed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef {
    Npc(NpcId),
    Player(PlayerId),
}

impl FromStr for TargetRef {
    type Err = EngineError;

    /// Integers address NPCs; `@name` or a `<@123>` mention addresses a player
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Some(mention) = token.strip_prefix("<@").and_then(|t| t.strip_suffix('>')) {
            let id = mention.trim_start_matches('!');
            if !id.is_empty() {
                return Ok(TargetRef::Player(PlayerId::new(id)));
            }
        }
        if let Some(name) = token.strip_prefix('@') {
            if !name.is_empty() {
                return Ok(TargetRef::Player(PlayerId::new(name)));
            }
        }
        token.parse::<NpcId>().map(TargetRef::Npc).map_err(|_| {
            EngineError::InvalidArgument(format!(
                "target '{}' must be an NPC id or a player mention",
                token
            ))
        })
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRef::Npc(id) => write!(f, "NPC #{}", id),
            TargetRef::Player(id) => write!(f, "@{}", id),
        }
    }
}

/// A parsed chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    CreateCharacter(NewCharacter),
    Sheet,
    AddTalent(String),
    RemoveTalent(String),
    AddMove(String),
    RemoveMove(String),
    UpdateHp(u32),
    Roll {
        attribute: Attribute,
        description: String,
    },
    Initiative,
    AttackPhysical {
        target: TargetRef,
    },
    SpecialMove {
        name: String,
        target: TargetRef,
    },
    AddXp(Vec<String>),
    CalcMasterXp,
    CreateNpc {
        id: NpcId,
        sheet: NewCharacter,
    },
    ViewNpc(NpcId),
    DeleteNpc(NpcId),
}

impl Command {
    /// Parse a raw message into a command
    pub fn parse(content: &str, prefix: &str) -> Result<Self, EngineError> {
        let body = content.trim().strip_prefix(prefix).ok_or_else(|| {
            EngineError::InvalidArgument(format!("commands must start with '{}'", prefix))
        })?;
        let (name, rest) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (body, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match name.to_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "create_character" => {
                expect_args(&args, 7, "create_character <name> <sign> <patent> <str> <agi> <cos> <wil>")?;
                Ok(Command::CreateCharacter(parse_sheet(
                    args[0],
                    Some(args[1]),
                    args[2],
                    &args[3..7],
                )?))
            }
            "sheet" => Ok(Command::Sheet),
            "add_talent" => Ok(Command::AddTalent(required_text(rest, "add_talent <talent>")?)),
            "remove_talent" => Ok(Command::RemoveTalent(required_text(
                rest,
                "remove_talent <talent>",
            )?)),
            "add_move" => Ok(Command::AddMove(required_text(rest, "add_move <move>")?)),
            "remove_move" => Ok(Command::RemoveMove(required_text(rest, "remove_move <move>")?)),
            "update_hp" => {
                expect_args(&args, 1, "update_hp <hit points>")?;
                Ok(Command::UpdateHp(parse_number(args[0], "hit points")?))
            }
            "roll" => {
                let attribute = args
                    .first()
                    .ok_or_else(|| usage("roll <STR|AGI|COS|WIL> [description]"))?
                    .parse::<Attribute>()?;
                let description = rest
                    .split_once(char::is_whitespace)
                    .map(|(_, description)| description.trim())
                    .filter(|description| !description.is_empty())
                    .unwrap_or(DEFAULT_ROLL_DESCRIPTION)
                    .to_string();
                Ok(Command::Roll {
                    attribute,
                    description,
                })
            }
            "initiative" => Ok(Command::Initiative),
            "attack_physical" => {
                expect_args(&args, 1, "attack_physical <target>")?;
                Ok(Command::AttackPhysical {
                    target: args[0].parse()?,
                })
            }
            "special_move" => {
                if args.len() < 2 {
                    return Err(usage("special_move <move name> <target>"));
                }
                let (target, name) = args.split_last().ok_or_else(|| {
                    usage("special_move <move name> <target>")
                })?;
                Ok(Command::SpecialMove {
                    name: name.join(" "),
                    target: target.parse()?,
                })
            }
            "add_xp" => {
                if args.is_empty() {
                    return Err(usage("add_xp <values...>"));
                }
                Ok(Command::AddXp(args.iter().map(|a| a.to_string()).collect()))
            }
            "calc_master_xp" => Ok(Command::CalcMasterXp),
            "create_npc" => {
                expect_args(&args, 7, "create_npc <id> <name> <patent> <str> <agi> <cos> <wil>")?;
                Ok(Command::CreateNpc {
                    id: parse_npc_id(args[0])?,
                    sheet: parse_sheet(args[1], None, args[2], &args[3..7])?,
                })
            }
            "npc" => {
                expect_args(&args, 1, "npc <id>")?;
                Ok(Command::ViewNpc(parse_npc_id(args[0])?))
            }
            "delete_npc" => {
                expect_args(&args, 1, "delete_npc <id>")?;
                Ok(Command::DeleteNpc(parse_npc_id(args[0])?))
            }
            other => Err(EngineError::UnknownCommand(other.to_string())),
        }
    }

    /// Whether running the command can change stored sheets
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::Help
                | Command::Sheet
                | Command::Roll { .. }
                | Command::Initiative
                | Command::CalcMasterXp
                | Command::ViewNpc(_)
        )
    }
}

fn usage(form: &str) -> EngineError {
    EngineError::InvalidArgument(format!("usage: {}", form))
}

fn expect_args(args: &[&str], count: usize, form: &str) -> Result<(), EngineError> {
    if args.len() == count {
        Ok(())
    } else {
        Err(usage(form))
    }
}

fn required_text(rest: &str, form: &str) -> Result<String, EngineError> {
    if rest.is_empty() {
        Err(usage(form))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_number(token: &str, what: &str) -> Result<u32, EngineError> {
    token.parse::<u32>().map_err(|_| {
        EngineError::InvalidArgument(format!(
            "{} must be a non-negative integer, got '{}'",
            what, token
        ))
    })
}

fn parse_npc_id(token: &str) -> Result<NpcId, EngineError> {
    token
        .parse::<NpcId>()
        .map_err(|_| EngineError::InvalidArgument(format!("NPC id must be an integer, got '{}'", token)))
}

fn parse_sheet(
    name: &str,
    sign: Option<&str>,
    patent: &str,
    attributes: &[&str],
) -> Result<NewCharacter, EngineError> {
    let patent = patent.parse::<Patent>()?;
    let values = Attribute::ALL
        .iter()
        .zip(attributes)
        .map(|(attribute, token)| parse_number(token, attribute.abbreviation()))
        .collect::<Result<Vec<u32>, _>>()?;

    Ok(NewCharacter {
        name: name.to_string(),
        sign: sign.map(str::to_string),
        patent,
        strength: values[0],
        agility: values[1],
        cosmos: values[2],
        will: values[3],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Command, EngineError> {
        Command::parse(content, "!")
    }

    #[test]
    fn test_parse_create_character() {
        let command = parse("!create_character Seiya Pegasus Aspirante 3 3 2 2").unwrap();
        assert_eq!(
            command,
            Command::CreateCharacter(NewCharacter {
                name: "Seiya".to_string(),
                sign: Some("Pegasus".to_string()),
                patent: Patent::Aspirant,
                strength: 3,
                agility: 3,
                cosmos: 2,
                will: 2,
            })
        );
    }

    #[test]
    fn test_parse_create_character_rejects_bad_input() {
        assert!(matches!(
            parse("!create_character Seiya Pegasus Platinum 3 3 2 2"),
            Err(EngineError::InvalidPatent(_))
        ));
        assert!(matches!(
            parse("!create_character Seiya Pegasus Bronze 3 three 2 2"),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse("!create_character Seiya Pegasus Bronze 3 3"),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_rest_of_line_arguments() {
        assert_eq!(
            parse("!add_move Pegasus Meteor Fist").unwrap(),
            Command::AddMove("Pegasus Meteor Fist".to_string())
        );
        assert_eq!(
            parse("!add_talent   Cosmo Sense ").unwrap(),
            Command::AddTalent("Cosmo Sense".to_string())
        );
        assert!(parse("!remove_move").is_err());
    }

    #[test]
    fn test_parse_roll() {
        assert_eq!(
            parse("!roll COS Stellar explosion").unwrap(),
            Command::Roll {
                attribute: Attribute::Cosmos,
                description: "Stellar explosion".to_string(),
            }
        );
        assert_eq!(
            parse("!roll agi").unwrap(),
            Command::Roll {
                attribute: Attribute::Agility,
                description: DEFAULT_ROLL_DESCRIPTION.to_string(),
            }
        );
        assert!(matches!(
            parse("!roll LUCK"),
            Err(EngineError::InvalidAttribute(_))
        ));
    }

    #[test]
    fn test_parse_special_move_takes_last_token_as_target() {
        assert_eq!(
            parse("!special_move Pegasus Meteor Fist 123").unwrap(),
            Command::SpecialMove {
                name: "Pegasus Meteor Fist".to_string(),
                target: TargetRef::Npc(NpcId::new(123)),
            }
        );
        assert_eq!(
            parse("!special_move Diamond Dust <@42>").unwrap(),
            Command::SpecialMove {
                name: "Diamond Dust".to_string(),
                target: TargetRef::Player(PlayerId::new("42")),
            }
        );
        assert!(matches!(
            parse("!special_move Meteor abc"),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(parse("!special_move 123").is_err());
    }

    #[test]
    fn test_parse_attack_and_npc_commands() {
        assert_eq!(
            parse("!attack_physical 7").unwrap(),
            Command::AttackPhysical {
                target: TargetRef::Npc(NpcId::new(7)),
            }
        );
        assert_eq!(
            parse("!attack_physical @shun").unwrap(),
            Command::AttackPhysical {
                target: TargetRef::Player(PlayerId::new("shun")),
            }
        );
        assert_eq!(parse("!npc 12").unwrap(), Command::ViewNpc(NpcId::new(12)));
        assert_eq!(parse("!delete_npc 12").unwrap(), Command::DeleteNpc(NpcId::new(12)));

        let Command::CreateNpc { id, sheet } = parse("!create_npc 5 Soldier Bronze 2 4 1 1").unwrap()
        else {
            panic!("Expected CreateNpc");
        };
        assert_eq!(id, NpcId::new(5));
        assert_eq!(sheet.sign, None);
        assert_eq!(sheet.agility, 4);
    }

    #[test]
    fn test_parse_numeric_arguments() {
        assert_eq!(parse("!update_hp 100").unwrap(), Command::UpdateHp(100));
        assert!(matches!(
            parse("!update_hp -3"),
            Err(EngineError::InvalidArgument(_))
        ));
        // add_xp tokens are validated by the experience rules
        assert_eq!(
            parse("!add_xp 40 ten").unwrap(),
            Command::AddXp(vec!["40".to_string(), "ten".to_string()])
        );
    }

    #[test]
    fn test_parse_unknown_and_unprefixed() {
        assert_eq!(
            parse("!dance"),
            Err(EngineError::UnknownCommand("dance".to_string()))
        );
        assert!(matches!(parse("sheet"), Err(EngineError::InvalidArgument(_))));
        assert_eq!(Command::parse("?sheet", "?").unwrap(), Command::Sheet);
    }
}
