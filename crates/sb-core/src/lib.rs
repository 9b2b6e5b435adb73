//! sb-core: battle engine and combatant rules for Slime Battle
//!
//! This crate contains all game logic with no I/O dependencies.
//! Presentation (menus, colors, portraits) lives in the `slime-battle` binary;
//! everything here is driven through [`battle::Battle`] and is testable with
//! an injected random source.

pub mod battle;
pub mod combat;
pub mod magic;
pub mod monster;
pub mod object;
pub mod options;
pub mod player;

mod consts;
mod error;
mod rng;
mod stats;

pub use battle::{
    Action, ActionSource, Battle, BattleEvent, BattlePhase, BattleResult, BattleState,
    EncounterSnapshot, RoundOutcome, Rules, ScriptedActions, TargetSide,
};
pub use consts::*;
pub use error::BattleError;
pub use options::{BattleOptions, OptionsError};
pub use rng::{BattleRng, GameRng, ScriptedRng};
pub use stats::{Stat, Stats};
