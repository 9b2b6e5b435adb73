//! Monster-vs-player combat
//!
//! A monster's turn is: try to run away, otherwise maybe use its special
//! ability, otherwise attack. Monster attacks never miss.

use serde::Serialize;
use tracing::debug;

use super::{CombatResult, StatusEffect, melee_damage};
use crate::consts::MIN_DAMAGE;
use crate::monster::{Monster, SpecialAbility};
use crate::player::Player;
use crate::rng::BattleRng;

/// What a monster did on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MonsterAction {
    Escaped,
    Attacked(CombatResult),
    Special(SpecialOutcome),
}

/// Result of a special ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpecialOutcome {
    /// Poison attack; `newly_applied` is false if the player was already poisoned
    Poisoned { newly_applied: bool },
    /// Double-strength attack
    Split(CombatResult),
    /// Ability with no attack of its own; a normal attack was made instead
    Fallback(CombatResult),
}

/// Damage of a split attack: double attack power minus half the defense, at least 1
pub fn split_damage(attack: u32, defense: u32) -> u32 {
    let raw = 2 * i64::from(attack) - i64::from(defense / 2);
    raw.max(i64::from(MIN_DAMAGE)) as u32
}

/// Roll the monster's escape check
pub fn monster_escapes(monster: &Monster, rng: &mut impl BattleRng) -> bool {
    rng.chance(monster.escape_chance)
}

/// Normal monster attack
pub fn monster_attack_player(monster: &Monster, player: &mut Player) -> CombatResult {
    let damage = melee_damage(monster.stats.attack, player.stats.defense);
    let dealt = player.stats.take_damage(damage);
    debug!(monster = monster.name(), damage = dealt, hp = player.stats.hp, "monster attack");
    CombatResult::hit(dealt, player.stats.is_defeated())
}

/// Use the monster's special ability
pub fn monster_special_attack(monster: &Monster, player: &mut Player) -> SpecialOutcome {
    match monster.special {
        Some(SpecialAbility::Poison) => {
            let newly_applied = player.stats.status.apply(StatusEffect::Poison);
            debug!(monster = monster.name(), newly_applied, "poison attack");
            SpecialOutcome::Poisoned { newly_applied }
        }
        Some(SpecialAbility::Split) => {
            let damage = split_damage(monster.stats.attack, player.stats.defense);
            let dealt = player.stats.take_damage(damage);
            debug!(monster = monster.name(), damage = dealt, "split attack");
            SpecialOutcome::Split(CombatResult::hit(dealt, player.stats.is_defeated()))
        }
        Some(SpecialAbility::Evasive) | None => {
            SpecialOutcome::Fallback(monster_attack_player(monster, player))
        }
    }
}

/// Resolve a full monster turn
///
/// The special-ability roll is only drawn for monsters that have one.
pub fn monster_turn(
    monster: &Monster,
    player: &mut Player,
    special_chance: f64,
    rng: &mut impl BattleRng,
) -> MonsterAction {
    if monster_escapes(monster, rng) {
        debug!(monster = monster.name(), "monster escaped");
        return MonsterAction::Escaped;
    }

    if monster.special.is_some() && rng.chance(special_chance) {
        MonsterAction::Special(monster_special_attack(monster, player))
    } else {
        MonsterAction::Attacked(monster_attack_player(monster, player))
    }
}
