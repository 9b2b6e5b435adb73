//! Battle engine
//!
//! One [`Battle`] drives one encounter between a borrowed [`Player`] and an
//! owned [`Monster`]. Each round runs the player's action, then the monster's
//! turn, then status effects, stopping as soon as the encounter resolves:
//!
//! ```text
//! NotStarted -> EncounterAnnounced -> PlayerTurn -> EnemyTurn -> StatusTick
//!                                         ^                          |
//!                                         +--------------------------+
//! terminal: BattleWon | BattleLost | PlayerFled
//! ```
//!
//! Rejected actions return a [`BattleError`] and leave the battle untouched.

mod action;
mod event;
mod snapshot;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info, warn};

use crate::combat::{
    MonsterAction, SpecialOutcome, StatusEffect, monster_turn, player_attack_monster,
    tick_status_effects,
};
use crate::consts::{ESCAPE_EXP_DIVISOR, FLEE_CHANCE, PLAYER_HIT_CHANCE, SPECIAL_ABILITY_CHANCE};
use crate::error::BattleError;
use crate::magic::SpellOutcome;
use crate::monster::{BESTIARY, Monster, MonsterKind, MonsterTemplate};
use crate::player::Player;
use crate::rng::{BattleRng, GameRng};

pub use action::{Action, ActionSource, ScriptedActions, TargetSide};
pub use event::BattleEvent;
pub use snapshot::{BattleState, EncounterSnapshot, RoundOutcome};

/// Probabilities the engine rolls against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Player weapon attack connects
    pub hit_chance: f64,
    /// Player gets away when fleeing
    pub flee_chance: f64,
    /// Monster uses its special ability instead of attacking
    pub special_chance: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            hit_chance: PLAYER_HIT_CHANCE,
            flee_chance: FLEE_CHANCE,
            special_chance: SPECIAL_ABILITY_CHANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum BattlePhase {
    NotStarted,
    EncounterAnnounced,
    PlayerTurn,
    EnemyTurn,
    StatusTick,
    BattleWon,
    BattleLost,
    PlayerFled,
}

impl BattlePhase {
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            BattlePhase::BattleWon | BattlePhase::BattleLost | BattlePhase::PlayerFled
        )
    }

    /// Whether the battle is waiting for a player action
    pub const fn accepts_actions(&self) -> bool {
        matches!(self, BattlePhase::EncounterAnnounced | BattlePhase::PlayerTurn)
    }
}

/// How an encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BattleResult {
    /// Monster defeated, or it ran away
    Won { monster_escaped: bool },
    Lost,
    Fled,
}

impl BattleResult {
    const fn phase(&self) -> BattlePhase {
        match self {
            BattleResult::Won { .. } => BattlePhase::BattleWon,
            BattleResult::Lost => BattlePhase::BattleLost,
            BattleResult::Fled => BattlePhase::PlayerFled,
        }
    }
}

pub struct Battle<'p, R: BattleRng = GameRng> {
    player: &'p mut Player,
    monster: Option<Monster>,
    bestiary: &'static [MonsterTemplate],
    rng: R,
    rules: Rules,
    turn: u32,
    phase: BattlePhase,
    result: Option<BattleResult>,
}

impl<'p, R: BattleRng> Battle<'p, R> {
    pub fn new(player: &'p mut Player, rng: R) -> Self {
        Self {
            player,
            monster: None,
            bestiary: BESTIARY,
            rng,
            rules: Rules::default(),
            turn: 0,
            phase: BattlePhase::NotStarted,
            result: None,
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Draw encounters from a different monster table
    pub fn with_bestiary(mut self, bestiary: &'static [MonsterTemplate]) -> Self {
        self.bestiary = bestiary;
        self
    }

    /// Draw a monster uniformly from the bestiary and announce it
    pub fn start_encounter(&mut self) -> Result<EncounterSnapshot, BattleError> {
        self.ensure_not_started()?;
        if self.bestiary.is_empty() {
            return Err(BattleError::InvalidAction(
                "there are no monsters to encounter".to_string(),
            ));
        }
        let index = self.rng.pick(self.bestiary.len());
        let monster = Monster::from_template(&self.bestiary[index]);
        Ok(self.announce(monster))
    }

    /// Start an encounter against a specific monster family
    pub fn start_encounter_with(
        &mut self,
        kind: MonsterKind,
    ) -> Result<EncounterSnapshot, BattleError> {
        self.ensure_not_started()?;
        Ok(self.announce(Monster::spawn(kind)))
    }

    fn ensure_not_started(&self) -> Result<(), BattleError> {
        if self.phase == BattlePhase::NotStarted {
            Ok(())
        } else {
            Err(BattleError::InvalidAction(
                "the encounter has already started".to_string(),
            ))
        }
    }

    fn announce(&mut self, monster: Monster) -> EncounterSnapshot {
        info!(
            monster = monster.name(),
            hp = monster.stats.hp,
            player = self.player.name(),
            "encounter started"
        );
        let message = format!("A wild {} appears!", monster.name());
        self.monster = Some(monster.clone());
        self.turn = 0;
        self.phase = BattlePhase::EncounterAnnounced;

        EncounterSnapshot {
            monster,
            player: self.player.clone(),
            message,
        }
    }

    /// Resolve one round starting with the given player action
    pub fn submit_action(&mut self, action: Action) -> Result<RoundOutcome, BattleError> {
        if !self.phase.accepts_actions() {
            let reason = if self.phase.is_terminal() {
                "the battle is already over"
            } else {
                "the encounter has not started"
            };
            return Err(BattleError::InvalidAction(reason.to_string()));
        }
        if let Action::Cast { spell, .. } = &action {
            self.player.check_cast(spell)?;
        }
        let Some(mut monster) = self.monster.take() else {
            return Err(BattleError::InvalidAction(
                "there is no monster to fight".to_string(),
            ));
        };

        self.turn += 1;
        self.phase = BattlePhase::PlayerTurn;
        debug!(turn = self.turn, %action, "round started");

        let round = self.play_round(&mut monster, &action);
        self.monster = Some(monster);
        let events = round?;

        Ok(RoundOutcome {
            turn: self.turn,
            events,
            phase: self.phase,
            result: self.result,
            state: self.current_state(),
        })
    }

    fn play_round(
        &mut self,
        monster: &mut Monster,
        action: &Action,
    ) -> Result<Vec<BattleEvent>, BattleError> {
        let mut events = Vec::new();

        // Player
        match action {
            Action::Attack => self.resolve_attack(monster, &mut events),
            Action::Cast { spell, target } => {
                self.resolve_cast(monster, spell, *target, &mut events)?
            }
            Action::Flee => self.resolve_flee(&mut events),
        }
        if self.phase.is_terminal() {
            return Ok(events);
        }

        // Monster
        self.phase = BattlePhase::EnemyTurn;
        self.resolve_monster_turn(monster, &mut events);
        if self.phase.is_terminal() {
            return Ok(events);
        }

        // Status effects
        self.phase = BattlePhase::StatusTick;
        for tick in tick_status_effects(&mut self.player.stats) {
            events.push(BattleEvent::StatusDamage {
                target: self.player.name().to_string(),
                effect: tick.effect,
                damage: tick.damage,
            });
        }
        if self.player.stats.is_defeated() {
            self.player_defeated(&mut events);
            return Ok(events);
        }

        self.phase = BattlePhase::PlayerTurn;
        Ok(events)
    }

    fn resolve_attack(&mut self, monster: &mut Monster, events: &mut Vec<BattleEvent>) {
        let result =
            player_attack_monster(&*self.player, monster, self.rules.hit_chance, &mut self.rng);
        if result.hit {
            events.push(BattleEvent::Attack {
                attacker: self.player.name().to_string(),
                target: monster.name().to_string(),
                damage: result.damage,
            });
        } else {
            events.push(BattleEvent::Miss {
                attacker: self.player.name().to_string(),
            });
        }
        if result.defender_died {
            self.victory(monster, events);
        }
    }

    fn resolve_cast(
        &mut self,
        monster: &mut Monster,
        spell: &str,
        target: Option<TargetSide>,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        let spell_type = self.player.check_cast(spell)?;
        let on_enemy = match target {
            Some(TargetSide::Enemy) => true,
            Some(TargetSide::Caster) => false,
            None => spell_type.targets_enemy(),
        };
        let result = if on_enemy {
            self.player.cast_spell(spell, Some(&mut monster.stats))?
        } else {
            self.player.cast_spell(spell, None)?
        };

        events.push(BattleEvent::SpellCast {
            caster: self.player.name().to_string(),
            spell: result.spell,
            mp_spent: result.mp_spent,
            message: result.message,
        });

        match result.outcome {
            SpellOutcome::Damaged {
                target,
                amount,
                element,
                ..
            } => {
                let mut total = amount;
                if on_enemy && monster.is_weak_to(element) {
                    // Weakness doubles the spell by landing its base damage again
                    total += monster.stats.take_damage(spell_type.magnitude());
                    events.push(BattleEvent::WeaknessExploited {
                        target: target.clone(),
                    });
                }
                events.push(BattleEvent::Damage {
                    target,
                    amount: total,
                });
            }
            SpellOutcome::Healed { target, amount } => {
                events.push(BattleEvent::Healed { target, amount });
            }
            SpellOutcome::AttackRaised { target, from, to } => {
                events.push(BattleEvent::AttackRaised { target, from, to });
            }
            SpellOutcome::Narrative => {}
        }

        if monster.stats.is_defeated() {
            self.victory(monster, events);
        }
        Ok(())
    }

    fn resolve_flee(&mut self, events: &mut Vec<BattleEvent>) {
        let name = self.player.name().to_string();
        if self.rng.chance(self.rules.flee_chance) {
            events.push(BattleEvent::FleeSucceeded { name });
            self.finish(BattleResult::Fled);
        } else {
            events.push(BattleEvent::FleeFailed { name });
        }
    }

    fn resolve_monster_turn(&mut self, monster: &mut Monster, events: &mut Vec<BattleEvent>) {
        let action = monster_turn(
            monster,
            &mut *self.player,
            self.rules.special_chance,
            &mut self.rng,
        );
        let attacker = monster.name().to_string();
        let target = self.player.name().to_string();

        match action {
            MonsterAction::Escaped => {
                let exp = monster.exp_reward() / ESCAPE_EXP_DIVISOR;
                events.push(BattleEvent::MonsterEscaped {
                    monster: attacker,
                    exp,
                });
                self.award_experience(exp, events);
                self.finish(BattleResult::Won {
                    monster_escaped: true,
                });
                return;
            }
            MonsterAction::Attacked(result)
            | MonsterAction::Special(SpecialOutcome::Fallback(result)) => {
                events.push(BattleEvent::Attack {
                    attacker,
                    target,
                    damage: result.damage,
                });
            }
            MonsterAction::Special(SpecialOutcome::Split(result)) => {
                events.push(BattleEvent::SplitAttack {
                    attacker,
                    target,
                    damage: result.damage,
                });
            }
            MonsterAction::Special(SpecialOutcome::Poisoned { newly_applied }) => {
                events.push(BattleEvent::StatusApplied {
                    attacker,
                    target,
                    effect: StatusEffect::Poison,
                    newly_applied,
                });
            }
        }

        if self.player.stats.is_defeated() {
            self.player_defeated(events);
        }
    }

    fn victory(&mut self, monster: &Monster, events: &mut Vec<BattleEvent>) {
        let exp = monster.exp_reward();
        let gold = monster.gold;
        events.push(BattleEvent::Defeated {
            monster: monster.name().to_string(),
        });
        events.push(BattleEvent::Rewards { exp, gold });
        self.player.gold = self.player.gold.saturating_add(gold);
        self.award_experience(exp, events);
        self.finish(BattleResult::Won {
            monster_escaped: false,
        });
    }

    fn award_experience(&mut self, exp: u64, events: &mut Vec<BattleEvent>) {
        for level_up in self.player.gain_experience(exp) {
            info!(
                player = self.player.name(),
                level = level_up.level,
                learned = level_up.learned.len(),
                "level up"
            );
            events.push(BattleEvent::LevelUp {
                name: self.player.name().to_string(),
                level: level_up.level,
                learned: level_up.learned,
            });
        }
    }

    fn player_defeated(&mut self, events: &mut Vec<BattleEvent>) {
        events.push(BattleEvent::PlayerDefeated {
            name: self.player.name().to_string(),
        });
        self.finish(BattleResult::Lost);
    }

    fn finish(&mut self, result: BattleResult) {
        self.phase = result.phase();
        self.result = Some(result);
        self.player.stats.status.clear();
        info!(turn = self.turn, ?result, "battle ended");
    }

    /// Run rounds until the encounter resolves or the source runs dry
    ///
    /// Rejected actions are reported to the source and asked for again.
    /// Returns `None` if the source stopped before the battle ended.
    pub fn run(
        &mut self,
        source: &mut impl ActionSource,
    ) -> Result<Option<BattleResult>, BattleError> {
        if self.phase == BattlePhase::NotStarted {
            return Err(BattleError::InvalidAction(
                "the encounter has not started".to_string(),
            ));
        }

        while self.result.is_none() {
            let state = self.current_state();
            let Some(action) = source.next_action(&state) else {
                return Ok(None);
            };
            match self.submit_action(action) {
                Ok(outcome) => source.on_round(&outcome),
                Err(err) => {
                    warn!(error = %err, "action rejected");
                    source.on_rejected(&err);
                }
            }
        }
        Ok(self.result)
    }

    /// Snapshot of both combatants and the battle's progress
    pub fn current_state(&self) -> BattleState {
        BattleState {
            player: self.player.clone(),
            monster: self.monster.clone(),
            turn: self.turn,
            phase: self.phase,
            terminal: self.phase.is_terminal(),
            result: self.result,
        }
    }

    pub fn player(&self) -> &Player {
        &*self.player
    }

    pub fn monster(&self) -> Option<&Monster> {
        self.monster.as_ref()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn result(&self) -> Option<BattleResult> {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Give the random source back once the battle is done
    pub fn into_rng(self) -> R {
        self.rng
    }
}
