//! Command Service - Dispatches parsed chat commands to the use cases
//!
//! Keeps the transport layer thin: a caller identity and a raw message go
//! in, a structured [`CommandOutcome`] comes out.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::dto::{Command, CommandOutcome, SheetEntryKind};
use crate::application::services::{
    CharacterService, CharacterServiceImpl, CombatService, ExperienceService,
};
use crate::domain::value_objects::PlayerId;
use crate::domain::EngineError;

pub struct CommandService {
    prefix: String,
    characters: Arc<CharacterServiceImpl>,
    combat: Arc<CombatService>,
    experience: Arc<ExperienceService>,
}

impl CommandService {
    pub fn new(
        prefix: impl Into<String>,
        characters: Arc<CharacterServiceImpl>,
        combat: Arc<CombatService>,
        experience: Arc<ExperienceService>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            characters,
            combat,
            experience,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse and run one chat message on behalf of `caller`
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        caller: &PlayerId,
        content: &str,
    ) -> Result<CommandOutcome, EngineError> {
        let command = Command::parse(content, &self.prefix)?;
        if command.is_mutating() {
            info!("Running {:?} for {}", command, caller);
        } else {
            debug!("Running {:?} for {}", command, caller);
        }
        self.dispatch(caller, command).await
    }

    async fn dispatch(
        &self,
        caller: &PlayerId,
        command: Command,
    ) -> Result<CommandOutcome, EngineError> {
        let outcome = match command {
            Command::Help => CommandOutcome::Help,
            Command::CreateCharacter(sheet) => CommandOutcome::CharacterCreated(
                self.characters.create_character(caller, sheet).await?,
            ),
            Command::Sheet => CommandOutcome::Sheet(self.characters.get_sheet(caller).await?),
            Command::AddTalent(name) => {
                self.characters.add_talent(caller, &name).await?;
                CommandOutcome::EntryAdded {
                    kind: SheetEntryKind::Talent,
                    name,
                }
            }
            Command::RemoveTalent(name) => {
                self.characters.remove_talent(caller, &name).await?;
                CommandOutcome::EntryRemoved {
                    kind: SheetEntryKind::Talent,
                    name,
                }
            }
            Command::AddMove(name) => {
                self.characters.add_special_move(caller, &name).await?;
                CommandOutcome::EntryAdded {
                    kind: SheetEntryKind::SpecialMove,
                    name,
                }
            }
            Command::RemoveMove(name) => {
                self.characters.remove_special_move(caller, &name).await?;
                CommandOutcome::EntryRemoved {
                    kind: SheetEntryKind::SpecialMove,
                    name,
                }
            }
            Command::UpdateHp(hit_points) => {
                let character = self.characters.update_hit_points(caller, hit_points).await?;
                CommandOutcome::HitPointsUpdated {
                    character: character.name,
                    hit_points: character.hit_points,
                }
            }
            Command::Roll {
                attribute,
                description,
            } => CommandOutcome::Roll(self.combat.roll(caller, attribute, &description).await?),
            Command::Initiative => CommandOutcome::Initiative(self.combat.initiative(caller).await?),
            Command::AttackPhysical { target } => {
                CommandOutcome::Attack(self.combat.attack_physical(caller, &target).await?)
            }
            Command::SpecialMove { name, target } => CommandOutcome::SpecialMove(
                self.combat.special_move(caller, &name, &target).await?,
            ),
            Command::AddXp(values) => CommandOutcome::ExperienceAdded(
                self.experience.add_experience(caller, &values).await?,
            ),
            Command::CalcMasterXp => {
                CommandOutcome::MasterExperience(self.experience.master_experience().await?)
            }
            Command::CreateNpc { id, sheet } => CommandOutcome::NpcCreated {
                id,
                npc: self.characters.create_npc(id, sheet).await?,
            },
            Command::ViewNpc(id) => CommandOutcome::Npc {
                id,
                npc: self.characters.get_npc(id).await?,
            },
            Command::DeleteNpc(id) => {
                self.characters.delete_npc(id).await?;
                CommandOutcome::NpcDeleted(id)
            }
        };

        Ok(outcome)
    }
}
