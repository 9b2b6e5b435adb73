//! Monster system
//!
//! Contains monster templates (permonst), the bestiary table and instances (monst).

mod bestiary;
mod monst;
mod permonst;

pub use bestiary::{BESTIARY, template};
pub use monst::Monster;
pub use permonst::{MonsterKind, MonsterTemplate, Portrait, SlimeColor, SpecialAbility};
