//! Core game constants
//!
//! Balance numbers shared by the combat rules and the leveling curve.

/// Experience needed to leave level 1
pub const BASE_LEVEL_EXP: f64 = 100.0;

/// Growth factor of the experience requirement per level
pub const LEVEL_EXP_MULTIPLIER: f64 = 1.5;

/// Chance that a player's weapon attack connects
pub const PLAYER_HIT_CHANCE: f64 = 0.95;

/// Chance that the player gets away when fleeing
pub const FLEE_CHANCE: f64 = 0.5;

/// Chance that a monster with a special ability uses it instead of a normal attack
pub const SPECIAL_ABILITY_CHANCE: f64 = 0.3;

/// Every hit deals at least this much damage
pub const MIN_DAMAGE: u32 = 1;

/// Poison deals max HP / this divisor each round
pub const POISON_DIVISOR: u32 = 10;

/// A monster that escapes leaves behind 1/n of its experience
pub const ESCAPE_EXP_DIVISOR: u64 = 3;
