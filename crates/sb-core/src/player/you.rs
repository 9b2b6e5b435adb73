//! The player character
//!
//! Owns its stats, learned spells, equipment and purse. Spell casting and
//! leveling live here; everything that involves the monster is resolved by
//! the battle engine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Job;
use crate::consts::{BASE_LEVEL_EXP, LEVEL_EXP_MULTIPLIER};
use crate::error::BattleError;
use crate::magic::{SpellResult, SpellType, apply_spell, spells_unlocked_at};
use crate::object::{self, Equipment, EquipmentItem, EquipmentSlot};
use crate::stats::Stats;

/// Experience needed to advance from `level` to `level + 1`
pub fn exp_threshold(level: u32) -> u64 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    (BASE_LEVEL_EXP * LEVEL_EXP_MULTIPLIER.powi(exponent)) as u64
}

/// One level gained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    /// The new level
    pub level: u32,
    /// Spells learned on reaching it
    pub learned: Vec<SpellType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub stats: Stats,
    pub job: Job,
    /// Learned spells in the order they were learned
    pub spells: Vec<SpellType>,
    pub equipment: Equipment,
    pub gold: u64,
}

impl Player {
    /// Create a level-1 character of the given class
    pub fn new(name: impl Into<String>, job: Job) -> Self {
        let base = job.base_stats();
        let mut stats = Stats::new(name, base.hp, base.mp);
        stats.attack = base.attack;
        stats.defense = base.defense;
        stats.magic_attack = base.magic_attack;
        stats.magic_defense = base.magic_defense;

        Self {
            stats,
            job,
            spells: job.starting_spells(),
            equipment: Equipment::new(),
            gold: 0,
        }
    }

    pub fn sage(name: impl Into<String>) -> Self {
        Self::new(name, Job::Sage)
    }

    pub fn adventurer(name: impl Into<String>) -> Self {
        Self::new(name, Job::Adventurer)
    }

    pub fn name(&self) -> &str {
        &self.stats.name
    }

    pub fn knows_spell(&self, spell: SpellType) -> bool {
        self.spells.contains(&spell)
    }

    /// Check that a spell can be cast right now, without casting it
    pub fn check_cast(&self, name: &str) -> Result<SpellType, BattleError> {
        let spell = name
            .trim()
            .parse::<SpellType>()
            .ok()
            .filter(|spell| self.knows_spell(*spell))
            .ok_or_else(|| BattleError::UnknownSpell {
                spell: name.trim().to_string(),
            })?;

        if self.stats.mp < spell.cost() {
            return Err(BattleError::insufficient_mana(
                spell,
                spell.cost(),
                self.stats.mp,
            ));
        }
        Ok(spell)
    }

    /// Cast a learned spell
    ///
    /// Without a target, heals and buffs act on the caster while damage
    /// spells have nothing to hit. On error nothing changes.
    pub fn cast_spell(
        &mut self,
        name: &str,
        target: Option<&mut Stats>,
    ) -> Result<SpellResult, BattleError> {
        let spell = self.check_cast(name)?;
        self.stats.use_mp(spell.cost());
        debug!(%spell, mp = self.stats.mp, "spell cast");

        let caster = self.stats.name.clone();
        let target = match target {
            Some(target) => Some(target),
            None if spell.targets_enemy() => None,
            None => Some(&mut self.stats),
        };
        Ok(apply_spell(&caster, spell, target))
    }

    /// Experience needed for the next level
    pub fn next_level_threshold(&self) -> u64 {
        exp_threshold(self.stats.level)
    }

    /// Advance one level: raise maxima, refill HP/MP, learn new spells
    pub fn apply_level_up(&mut self) -> LevelUp {
        let growth = self.job.growth();
        let stats = &mut self.stats;
        stats.level = stats.level.saturating_add(1);
        stats.hp_max = stats.hp_max.saturating_add(growth.hp);
        stats.mp_max = stats.mp_max.saturating_add(growth.mp);
        stats.attack = stats.attack.saturating_add(growth.attack);
        stats.defense = stats.defense.saturating_add(growth.defense);
        stats.magic_attack = stats.magic_attack.saturating_add(growth.magic_attack);
        stats.magic_defense = stats.magic_defense.saturating_add(growth.magic_defense);
        stats.restore_all();

        let mut learned = Vec::new();
        if self.job.is_spellcaster() {
            for spell in spells_unlocked_at(self.stats.level) {
                if !self.knows_spell(spell) {
                    self.spells.push(spell);
                    learned.push(spell);
                }
            }
        }

        LevelUp {
            level: self.stats.level,
            learned,
        }
    }

    /// Add experience and take every level-up it pays for
    ///
    /// Each level-up consumes the threshold it crossed.
    pub fn gain_experience(&mut self, exp: u64) -> Vec<LevelUp> {
        self.stats.exp = self.stats.exp.saturating_add(exp);

        let mut gained = Vec::new();
        while self.stats.exp >= self.next_level_threshold() {
            self.stats.exp -= self.next_level_threshold();
            gained.push(self.apply_level_up());
        }
        gained
    }

    /// Wear an item, returning the one it replaced
    pub fn equip(&mut self, item: EquipmentItem) -> Result<Option<EquipmentItem>, BattleError> {
        object::equip(&mut self.stats, &mut self.equipment, item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquipmentItem> {
        object::unequip(&mut self.stats, &mut self.equipment, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::SpellOutcome;
    use crate::stats::Stat;

    fn test_player() -> Player {
        Player::sage("Terry")
    }

    fn test_dummy() -> Stats {
        Stats::new("Dummy", 100, 0)
    }

    #[test]
    fn test_sage_starts_with_two_spells() {
        let player = test_player();
        assert_eq!(player.stats.level, 1);
        assert_eq!(player.stats.hp, 80);
        assert_eq!(player.stats.mp, 100);
        assert_eq!(player.spells, vec![SpellType::Heal, SpellType::Frizz]);
    }

    #[test]
    fn test_cast_damage_spell() {
        let mut player = test_player();
        let mut dummy = test_dummy();
        let result = player.cast_spell("Frizz", Some(&mut dummy)).unwrap();
        assert_eq!(dummy.hp, 70);
        assert_eq!(player.stats.mp, 95);
        assert_eq!(result.mp_spent, 5);
    }

    #[test]
    fn test_cast_unknown_spell_is_atomic() {
        let mut player = test_player();
        let mut dummy = test_dummy();
        let err = player.cast_spell("Kafrizzle", Some(&mut dummy)).unwrap_err();
        assert!(matches!(err, BattleError::UnknownSpell { .. }));
        let err = player.cast_spell("Kaboom", Some(&mut dummy)).unwrap_err();
        assert!(matches!(err, BattleError::UnknownSpell { .. }));
        assert_eq!(player.stats.mp, 100);
        assert_eq!(dummy.hp, 100);
    }

    #[test]
    fn test_cast_without_mana_is_atomic() {
        let mut player = test_player();
        player.stats.mp = 3;
        let mut dummy = test_dummy();
        let err = player.cast_spell("frizz", Some(&mut dummy)).unwrap_err();
        assert_eq!(err, BattleError::insufficient_mana(SpellType::Frizz, 5, 3));
        assert_eq!(err.mana_shortfall(), Some(2));
        assert_eq!(player.stats.mp, 3);
        assert_eq!(dummy.hp, 100);
    }

    #[test]
    fn test_heal_defaults_to_self() {
        let mut player = test_player();
        player.stats.hp = 40;
        let result = player.cast_spell("Heal", None).unwrap();
        assert_eq!(player.stats.hp, 70);
        assert_eq!(player.stats.mp, 96);
        assert!(matches!(result.outcome, SpellOutcome::Healed { amount: 30, .. }));
    }

    #[test]
    fn test_damage_without_target_only_costs_mp() {
        let mut player = test_player();
        let result = player.cast_spell("Frizz", None).unwrap();
        assert_eq!(result.outcome, SpellOutcome::Narrative);
        assert_eq!(player.stats.hp, 80);
        assert_eq!(player.stats.mp, 95);
    }

    #[test]
    fn test_exp_thresholds() {
        assert_eq!(exp_threshold(1), 100);
        assert_eq!(exp_threshold(2), 150);
        assert_eq!(exp_threshold(3), 225);
        assert_eq!(exp_threshold(4), 337);
    }

    #[test]
    fn test_level_up_growth_and_restore() {
        let mut player = test_player();
        player.stats.hp = 10;
        player.stats.mp = 0;
        let level_up = player.apply_level_up();
        assert_eq!(level_up.level, 2);
        assert!(level_up.learned.is_empty());
        assert_eq!(player.stats.hp_max, 85);
        assert_eq!(player.stats.hp, 85);
        assert_eq!(player.stats.mp_max, 108);
        assert_eq!(player.stats.mp, 108);
        assert_eq!(player.stats.magic_attack, 28);
        assert_eq!(player.stats.defense, 12);
    }

    #[test]
    fn test_level_three_teaches_spells() {
        let mut player = test_player();
        player.apply_level_up();
        let level_up = player.apply_level_up();
        assert_eq!(level_up.learned, vec![SpellType::Midheal, SpellType::Frizzle]);
        assert!(player.knows_spell(SpellType::Frizzle));
    }

    #[test]
    fn test_adventurer_learns_nothing() {
        let mut player = Player::adventurer("Tess");
        for _ in 0..10 {
            assert!(player.apply_level_up().learned.is_empty());
        }
        assert!(player.spells.is_empty());
        assert_eq!(player.stats.mp_max, 50 + 10 * 3);
    }

    #[test]
    fn test_gain_experience_crosses_two_levels() {
        let mut player = test_player();
        let gained = player.gain_experience(250);
        assert_eq!(gained.len(), 2);
        assert_eq!(player.stats.level, 3);
        assert_eq!(player.stats.exp, 0);
    }

    #[test]
    fn test_gain_experience_keeps_remainder() {
        let mut player = test_player();
        assert!(player.gain_experience(99).is_empty());
        assert_eq!(player.gain_experience(1).len(), 1);
        assert_eq!(player.stats.exp, 0);
        player.gain_experience(28);
        assert_eq!(player.stats.exp, 28);
        assert_eq!(player.stats.level, 2);
    }

    #[test]
    fn test_equip_through_player() {
        let mut player = test_player();
        let sword = EquipmentItem::new("Copper Sword", "weapon").with_modifier(Stat::Attack, 7);
        player.equip(sword).unwrap();
        assert_eq!(player.stats.attack, 22);
        player.unequip(EquipmentSlot::Weapon);
        assert_eq!(player.stats.attack, 15);
    }
}
