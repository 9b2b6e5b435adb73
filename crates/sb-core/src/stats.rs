//! Numeric state shared by the player and monsters
//!
//! HP and MP are unsigned and every mutation clamps, so `0 <= current <= max`
//! holds after any operation on [`Stats`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::combat::StatusSet;

/// A stat an equipment modifier can change
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Stat {
    /// Maximum HP (current HP is clamped, never raised)
    #[strum(serialize = "max_hp", serialize = "hp")]
    MaxHp,
    /// Maximum MP (current MP is clamped, never raised)
    #[strum(serialize = "max_mp", serialize = "mp")]
    MaxMp,
    Attack,
    Defense,
    MagicAttack,
    MagicDefense,
}

/// Combat attributes of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub name: String,
    pub level: u32,

    // Health
    pub hp: u32,
    pub hp_max: u32,

    // Magic
    pub mp: u32,
    pub mp_max: u32,

    // Combat
    pub attack: u32,
    pub defense: u32,
    pub magic_attack: u32,
    pub magic_defense: u32,

    /// Player: progress toward the next level. Monster: experience reward.
    pub exp: u64,

    pub status: StatusSet,
}

impl Stats {
    /// Create a level-1 entity at full HP and MP
    pub fn new(name: impl Into<String>, hp_max: u32, mp_max: u32) -> Self {
        Self {
            name: name.into(),
            level: 1,
            hp: hp_max,
            hp_max,
            mp: mp_max,
            mp_max,
            attack: 0,
            defense: 0,
            magic_attack: 0,
            magic_defense: 0,
            exp: 0,
            status: StatusSet::new(),
        }
    }

    /// Get the current value of a modifiable stat
    pub const fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::MaxHp => self.hp_max,
            Stat::MaxMp => self.mp_max,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::MagicAttack => self.magic_attack,
            Stat::MagicDefense => self.magic_defense,
        }
    }

    /// Shift a stat by a signed delta, returning the change actually made
    ///
    /// Stats saturate at 0, except max HP which never drops below 1.
    /// Changing a maximum clamps the matching current value down but never
    /// raises it.
    pub fn adjust(&mut self, stat: Stat, delta: i32) -> i32 {
        let before = self.get(stat);
        match stat {
            Stat::MaxHp => {
                self.hp_max = offset(self.hp_max, delta).max(MIN_MAX_HP);
                self.hp = self.hp.min(self.hp_max);
            }
            Stat::MaxMp => {
                self.mp_max = offset(self.mp_max, delta);
                self.mp = self.mp.min(self.mp_max);
            }
            Stat::Attack => self.attack = offset(self.attack, delta),
            Stat::Defense => self.defense = offset(self.defense, delta),
            Stat::MagicAttack => self.magic_attack = offset(self.magic_attack, delta),
            Stat::MagicDefense => self.magic_defense = offset(self.magic_defense, delta),
        }
        // Bounded by |delta|, so it fits
        (i64::from(self.get(stat)) - i64::from(before)) as i32
    }

    /// Take damage, returning the HP actually lost
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let lost = damage.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Heal damage, returning the HP actually restored
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.hp_max);
        self.hp - before
    }

    /// Use MP for spellcasting
    pub fn use_mp(&mut self, amount: u32) -> bool {
        if self.mp >= amount {
            self.mp -= amount;
            true
        } else {
            false
        }
    }

    /// Refill HP and MP to their maxima
    pub fn restore_all(&mut self) {
        self.hp = self.hp_max;
        self.mp = self.mp_max;
    }

    pub const fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

const MIN_MAX_HP: u32 = 1;

fn offset(value: u32, delta: i32) -> u32 {
    (i64::from(value) + i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32
}
