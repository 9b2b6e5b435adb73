//! Read-only views of a battle

use serde::Serialize;

use super::{BattleEvent, BattlePhase, BattleResult};
use crate::monster::Monster;
use crate::player::Player;

/// Everything a front end needs to announce a new encounter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterSnapshot {
    pub monster: Monster,
    pub player: Player,
    pub message: String,
}

/// Combined status of both combatants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleState {
    pub player: Player,
    pub monster: Option<Monster>,
    pub turn: u32,
    pub phase: BattlePhase,
    pub terminal: bool,
    pub result: Option<BattleResult>,
}

/// What happened during one round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundOutcome {
    pub turn: u32,
    pub events: Vec<BattleEvent>,
    pub phase: BattlePhase,
    /// Set once the round ended the encounter
    pub result: Option<BattleResult>,
    pub state: BattleState,
}

impl RoundOutcome {
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }
}
