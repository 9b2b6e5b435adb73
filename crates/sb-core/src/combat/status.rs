//! Status effects and per-round ticking

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{MIN_DAMAGE, POISON_DIVISOR};
use crate::stats::Stats;

/// A named ongoing condition
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusEffect {
    /// Loses a tenth of max HP every round
    Poison,
}

/// Ordered set of active effects
///
/// Applying an effect that is already present does nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSet {
    effects: Vec<StatusEffect>,
}

impl StatusSet {
    pub const fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Add an effect, returning true if it was not already active
    pub fn apply(&mut self, effect: StatusEffect) -> bool {
        if self.has(effect) {
            return false;
        }
        self.effects.push(effect);
        true
    }

    /// Cure a single effect, returning true if it was active
    pub fn remove(&mut self, effect: StatusEffect) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| *e != effect);
        self.effects.len() != before
    }

    pub fn has(&self, effect: StatusEffect) -> bool {
        self.effects.contains(&effect)
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Active effects in the order they were applied
    pub fn iter(&self) -> impl Iterator<Item = StatusEffect> + '_ {
        self.effects.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Damage dealt by one round of poison
pub fn poison_damage(hp_max: u32) -> u32 {
    (hp_max / POISON_DIVISOR).max(MIN_DAMAGE)
}

/// Damage taken from one effect during a status tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTick {
    pub effect: StatusEffect,
    pub damage: u32,
}

/// Apply one round of every active effect
pub fn tick_status_effects(stats: &mut Stats) -> Vec<StatusTick> {
    let active: Vec<StatusEffect> = stats.status.iter().collect();
    let mut ticks = Vec::with_capacity(active.len());
    for effect in active {
        let damage = match effect {
            StatusEffect::Poison => poison_damage(stats.hp_max),
        };
        let damage = stats.take_damage(damage);
        ticks.push(StatusTick { effect, damage });
        if stats.is_defeated() {
            break;
        }
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_is_idempotent() {
        let mut set = StatusSet::new();
        assert!(set.apply(StatusEffect::Poison));
        assert!(!set.apply(StatusEffect::Poison));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_cures() {
        let mut set = StatusSet::new();
        set.apply(StatusEffect::Poison);
        assert!(set.remove(StatusEffect::Poison));
        assert!(!set.remove(StatusEffect::Poison));
        assert!(set.is_empty());
    }

    #[test]
    fn test_poison_damage() {
        assert_eq!(poison_damage(80), 8);
        assert_eq!(poison_damage(85), 8);
        assert_eq!(poison_damage(5), 1);
        assert_eq!(poison_damage(0), 1);
    }

    #[test]
    fn test_tick_applies_poison() {
        let mut stats = Stats::new("Tester", 80, 0);
        stats.status.apply(StatusEffect::Poison);
        let ticks = tick_status_effects(&mut stats);
        assert_eq!(
            ticks,
            vec![StatusTick {
                effect: StatusEffect::Poison,
                damage: 8
            }]
        );
        assert_eq!(stats.hp, 72);
    }

    #[test]
    fn test_tick_without_effects_is_noop() {
        let mut stats = Stats::new("Tester", 80, 0);
        assert!(tick_status_effects(&mut stats).is_empty());
        assert_eq!(stats.hp, 80);
    }

    #[test]
    fn test_tick_reports_actual_loss() {
        let mut stats = Stats::new("Tester", 80, 0);
        stats.hp = 3;
        stats.status.apply(StatusEffect::Poison);
        let ticks = tick_status_effects(&mut stats);
        assert_eq!(ticks[0].damage, 3);
        assert!(stats.is_defeated());
    }

    #[test]
    fn test_effect_name() {
        assert_eq!(StatusEffect::Poison.to_string(), "poison");
    }
}
