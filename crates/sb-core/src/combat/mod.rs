//! Combat system
//!
//! Player-vs-monster and monster-vs-player resolution, plus status effects.

mod mhitu;
mod status;
mod uhitm;

use serde::Serialize;

use crate::consts::MIN_DAMAGE;

pub use mhitu::{
    MonsterAction, SpecialOutcome, monster_attack_player, monster_escapes,
    monster_special_attack, monster_turn, split_damage,
};
pub use status::{StatusEffect, StatusSet, StatusTick, poison_damage, tick_status_effects};
pub use uhitm::player_attack_monster;

/// Physical damage: attack minus half the defense, at least 1
pub fn melee_damage(attack: u32, defense: u32) -> u32 {
    let raw = i64::from(attack) - i64::from(defense / 2);
    raw.max(i64::from(MIN_DAMAGE)) as u32
}

/// Result of a combat action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombatResult {
    /// Whether the attack connected
    pub hit: bool,
    /// HP actually removed from the defender
    pub damage: u32,
    /// Whether the defender dropped to 0 HP
    pub defender_died: bool,
}

impl CombatResult {
    pub const MISS: Self = Self {
        hit: false,
        damage: 0,
        defender_died: false,
    };

    pub const fn hit(damage: u32, defender_died: bool) -> Self {
        Self {
            hit: true,
            damage,
            defender_died,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melee_damage_floor_division() {
        assert_eq!(melee_damage(15, 3), 14);
        assert_eq!(melee_damage(15, 10), 10);
        // 5 - 11/2 = 0, raised to the minimum
        assert_eq!(melee_damage(5, 11), 1);
    }

    #[test]
    fn test_melee_damage_minimum() {
        // 255 / 2 = 127, far above the attack
        assert_eq!(melee_damage(15, 255), 1);
        assert_eq!(melee_damage(0, 0), 1);
    }

    #[test]
    fn test_miss_constant() {
        assert!(!CombatResult::MISS.hit);
        assert_eq!(CombatResult::MISS.damage, 0);
        assert!(CombatResult::hit(4, true).defender_died);
    }
}
