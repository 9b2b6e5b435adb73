//! Magic system
//!
//! Implements the spellbook and spell effects.

pub mod spell;

pub use spell::{
    Element, SpellKind, SpellOutcome, SpellResult, SpellType, apply_spell, spells_unlocked_at,
};
