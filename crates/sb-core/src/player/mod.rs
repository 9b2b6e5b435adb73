//! Player character: classes, spells and progression

mod role;
mod you;

pub use role::{Job, StatBlock};
pub use you::{LevelUp, Player, exp_threshold};
