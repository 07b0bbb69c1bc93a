//! Combat Service - Checks, initiative and attacks
//!
//! Loads the acting player's sheet and the defender, hands both to the
//! resolution rules, and persists the defender when damage was applied.
//! An NPC id with no record resolves to the default NPC stand-in, which is
//! stored under that id once it has been hurt.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::dto::{
    AttackOutcome, InitiativeOutcome, RollOutcome, SpecialMoveOutcome, TargetRef,
};
use crate::application::ports::outbound::CharacterRepositoryPort;
use crate::application::services::WriteGate;
use crate::domain::entities::Character;
use crate::domain::services::{self, DiceRoller};
use crate::domain::value_objects::{Attribute, CharacterKey, PlayerId};
use crate::domain::EngineError;

pub struct CombatService {
    repository: Arc<dyn CharacterRepositoryPort>,
    dice: Arc<dyn DiceRoller>,
    write_gate: WriteGate,
}

impl CombatService {
    pub fn new(
        repository: Arc<dyn CharacterRepositoryPort>,
        dice: Arc<dyn DiceRoller>,
        write_gate: WriteGate,
    ) -> Self {
        Self {
            repository,
            dice,
            write_gate,
        }
    }

    async fn load_player(&self, player: &PlayerId) -> Result<Character, EngineError> {
        self.repository
            .get(&CharacterKey::Player(player.clone()))
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("character sheet for player {}", player)))
    }

    async fn load_defender(
        &self,
        target: &TargetRef,
    ) -> Result<(CharacterKey, Character), EngineError> {
        match target {
            TargetRef::Npc(id) => {
                let key = CharacterKey::Npc(*id);
                let npc = self
                    .repository
                    .get(&key)
                    .await?
                    .unwrap_or_else(|| Character::default_npc(*id));
                Ok((key, npc))
            }
            TargetRef::Player(id) => {
                let key = CharacterKey::Player(id.clone());
                let character = self
                    .repository
                    .get(&key)
                    .await?
                    .ok_or_else(|| EngineError::NotFound(format!("target {}", key)))?;
                Ok((key, character))
            }
        }
    }

    /// Attribute check for the caller's character
    #[instrument(skip(self))]
    pub async fn roll(
        &self,
        player: &PlayerId,
        attribute: Attribute,
        description: &str,
    ) -> Result<RollOutcome, EngineError> {
        let character = self.load_player(player).await?;
        let roll = services::attribute_check(self.dice.as_ref(), &character, attribute);

        Ok(RollOutcome {
            character: character.name,
            description: description.to_string(),
            roll,
        })
    }

    /// Initiative check for the caller's character
    #[instrument(skip(self))]
    pub async fn initiative(&self, player: &PlayerId) -> Result<InitiativeOutcome, EngineError> {
        let character = self.load_player(player).await?;
        let roll = services::initiative_check(self.dice.as_ref(), &character);

        Ok(InitiativeOutcome {
            character: character.name,
            roll,
        })
    }

    /// Physical attack from the caller against a target
    #[instrument(skip(self))]
    pub async fn attack_physical(
        &self,
        player: &PlayerId,
        target: &TargetRef,
    ) -> Result<AttackOutcome, EngineError> {
        let _guard = self.write_gate.lock().await;
        let attacker = self.load_player(player).await?;
        let (key, mut defender) = self.load_defender(target).await?;

        let report = services::physical_attack(self.dice.as_ref(), &attacker, &mut defender);
        if report.hit {
            self.repository.put(&key, &defender).await?;
            info!(
                "{} hit {} for {} damage ({} HP left)",
                attacker.name, key, report.final_damage, report.defender_hit_points
            );
        }

        Ok(AttackOutcome {
            attacker: attacker.name,
            defender: defender.name,
            report,
        })
    }

    /// Special move from the caller against a target
    #[instrument(skip(self))]
    pub async fn special_move(
        &self,
        player: &PlayerId,
        move_name: &str,
        target: &TargetRef,
    ) -> Result<SpecialMoveOutcome, EngineError> {
        let _guard = self.write_gate.lock().await;
        let attacker = self.load_player(player).await?;
        let (key, mut defender) = self.load_defender(target).await?;

        let report = services::special_move(self.dice.as_ref(), &attacker, &mut defender)?;
        if report.succeeded() {
            self.repository.put(&key, &defender).await?;
            info!(
                "{} landed '{}' on {} ({} HP left)",
                attacker.name, move_name, key, defender.hit_points
            );
        }

        Ok(SpecialMoveOutcome {
            attacker: attacker.name,
            move_name: move_name.to_string(),
            defender: defender.name,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{MockCharacterRepositoryPort, RepoError};
    use crate::application::services::new_write_gate;
    use crate::domain::entities::NewCharacter;
    use crate::domain::services::dice::testing::ScriptedDice;
    use crate::domain::services::{CheckOutcome, SpecialMoveResult};
    use crate::domain::value_objects::{NpcId, Patent};
    use crate::infrastructure::persistence::InMemoryCharacterRepository;

    const PLAYER: &str = "1001";

    async fn setup(
        patent: Patent,
        script: Vec<u32>,
    ) -> (CombatService, Arc<InMemoryCharacterRepository>) {
        let repository = Arc::new(InMemoryCharacterRepository::new());
        let character = Character::create(NewCharacter {
            name: "Shun".to_string(),
            sign: Some("Andromeda".to_string()),
            patent,
            strength: 3,
            agility: 3,
            cosmos: 2,
            will: 2,
        })
        .unwrap();
        repository
            .put(&CharacterKey::Player(PlayerId::new(PLAYER)), &character)
            .await
            .unwrap();

        let service = CombatService::new(
            repository.clone(),
            Arc::new(ScriptedDice::new(script)),
            new_write_gate(),
        );
        (service, repository)
    }

    #[tokio::test]
    async fn test_roll_requires_sheet() {
        let (service, _) = setup(Patent::Bronze, vec![]).await;
        let result = service
            .roll(&PlayerId::new("stranger"), Attribute::Cosmos, "Nebula Chain")
            .await;
        assert!(matches!(result, Err(EngineError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_roll_and_initiative_do_not_write() {
        let (service, repository) = setup(Patent::Bronze, vec![6, 2]).await;
        let before = repository.snapshot().await;
        let player = PlayerId::new(PLAYER);

        let roll = service
            .roll(&player, Attribute::Cosmos, "Nebula Chain")
            .await
            .unwrap();
        assert_eq!(roll.roll.total, 8);
        assert_eq!(roll.roll.outcome, CheckOutcome::Critical);

        let initiative = service.initiative(&player).await.unwrap();
        assert_eq!(initiative.roll.total, 4);

        assert_eq!(repository.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_attack_on_unknown_npc_persists_default_target() {
        // d6 draw 2 + agility 3 = 5 ties the default agility; d4 draw 3 + 3 - 2 = 4
        let (service, repository) = setup(Patent::Bronze, vec![2, 3]).await;

        let outcome = service
            .attack_physical(&PlayerId::new(PLAYER), &TargetRef::Npc(NpcId::new(123)))
            .await
            .unwrap();

        assert!(outcome.report.hit);
        assert_eq!(outcome.report.final_damage, 4);
        assert_eq!(outcome.defender, "NPC #123");
        let stored = repository
            .get(&CharacterKey::Npc(NpcId::new(123)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.hit_points, 16);
        assert_eq!(stored.patent, Patent::Bronze);
    }

    #[tokio::test]
    async fn test_missed_attack_stores_nothing() {
        let (service, repository) = setup(Patent::Bronze, vec![1, 4]).await;
        let before = repository.snapshot().await;

        let outcome = service
            .attack_physical(&PlayerId::new(PLAYER), &TargetRef::Npc(NpcId::new(5)))
            .await
            .unwrap();

        assert!(!outcome.report.hit);
        assert_eq!(repository.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_attack_on_missing_player_fails() {
        let (service, _) = setup(Patent::Bronze, vec![6, 4]).await;
        let result = service
            .attack_physical(
                &PlayerId::new(PLAYER),
                &TargetRef::Player(PlayerId::new("ghost")),
            )
            .await;
        assert!(matches!(result, Err(EngineError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_special_move_by_aspirant_is_forbidden() {
        let (service, repository) = setup(Patent::Aspirant, vec![4]).await;
        let before = repository.snapshot().await;

        let result = service
            .special_move(
                &PlayerId::new(PLAYER),
                "Nebula Stream",
                &TargetRef::Npc(NpcId::new(1)),
            )
            .await;

        assert!(matches!(result, Err(EngineError::ForbiddenAction(_))));
        assert_eq!(repository.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_special_move_success_damages_default_npc() {
        // d10 draw 10 + will 2 = 12 meets Bronze DC 12; 4 + 4 + 4 + cosmos 2 - 2 = 12
        let (service, repository) = setup(Patent::Gold, vec![10, 4, 4, 4]).await;

        let outcome = service
            .special_move(
                &PlayerId::new(PLAYER),
                "Nebula Storm",
                &TargetRef::Npc(NpcId::new(8)),
            )
            .await
            .unwrap();

        assert_eq!(outcome.report.difficulty, 12);
        assert!(outcome.report.succeeded());
        let stored = repository
            .get(&CharacterKey::Npc(NpcId::new(8)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.hit_points, 8);
    }

    #[tokio::test]
    async fn test_failed_special_move_leaves_player_target_untouched() {
        let (service, repository) = setup(Patent::Gold, vec![10]).await;
        let target = PlayerId::new("2002");
        let mut defender = Character::default_npc(NpcId::new(0));
        defender.name = "Ikki".to_string();
        defender.patent = Patent::Silver;
        defender.hit_points = 30;
        repository
            .put(&CharacterKey::Player(target.clone()), &defender)
            .await
            .unwrap();

        let outcome = service
            .special_move(
                &PlayerId::new(PLAYER),
                "Nebula Storm",
                &TargetRef::Player(target.clone()),
            )
            .await
            .unwrap();

        // 10 + 2 = 12 falls short of Silver DC 14
        assert_eq!(outcome.report.difficulty, 14);
        assert_eq!(
            outcome.report.result,
            SpecialMoveResult::Failure { weak_damage: 1 }
        );
        let stored = repository
            .get(&CharacterKey::Player(target))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, defender);
    }

    fn stored_knight() -> Character {
        Character::create(NewCharacter {
            name: "Shun".to_string(),
            sign: None,
            patent: Patent::Bronze,
            strength: 3,
            agility: 3,
            cosmos: 2,
            will: 2,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_failed_load_writes_nothing() {
        let mut repository = MockCharacterRepositoryPort::new();
        repository
            .expect_get()
            .returning(|_| Err(RepoError::Database("database is locked".to_string())));
        repository.expect_put().never();
        let service = CombatService::new(
            Arc::new(repository),
            Arc::new(ScriptedDice::new([6, 4])),
            new_write_gate(),
        );

        let result = service
            .attack_physical(&PlayerId::new(PLAYER), &TargetRef::Npc(NpcId::new(3)))
            .await;

        assert!(matches!(result, Err(EngineError::Storage(message)) if message.contains("database is locked")));
    }

    #[tokio::test]
    async fn test_failed_save_is_reported() {
        let mut repository = MockCharacterRepositoryPort::new();
        repository.expect_get().returning(|key| match key {
            CharacterKey::Player(_) => Ok(Some(stored_knight())),
            CharacterKey::Npc(_) => Ok(None),
        });
        repository
            .expect_put()
            .times(1)
            .returning(|_, _| Err(RepoError::Serialization("disk full".to_string())));
        let service = CombatService::new(
            Arc::new(repository),
            Arc::new(ScriptedDice::new([6, 4])),
            new_write_gate(),
        );

        let result = service
            .attack_physical(&PlayerId::new(PLAYER), &TargetRef::Npc(NpcId::new(3)))
            .await;

        assert!(matches!(result, Err(EngineError::Storage(message)) if message.contains("disk full")));
    }
}
