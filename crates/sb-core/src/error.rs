//! Errors raised by battle operations
//!
//! Every variant is a rejection of one attempted action: the engine state is
//! left untouched and the caller decides whether to ask again.

use thiserror::Error;

use crate::magic::SpellType;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("'{slot}' is not an equipment slot (expected weapon, armor or accessory)")]
    InvalidSlot { slot: String },

    #[error("{spell} is not a known spell")]
    UnknownSpell { spell: String },

    #[error("Not enough MP to cast {spell}: {shortfall} more needed")]
    InsufficientMana {
        spell: SpellType,
        cost: u32,
        available: u32,
        shortfall: u32,
    },

    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

impl BattleError {
    pub fn insufficient_mana(spell: SpellType, cost: u32, available: u32) -> Self {
        Self::InsufficientMana {
            spell,
            cost,
            available,
            shortfall: cost.saturating_sub(available),
        }
    }

    /// MP still missing for a rejected cast
    pub fn mana_shortfall(&self) -> Option<u32> {
        match self {
            Self::InsufficientMana { shortfall, .. } => Some(*shortfall),
            _ => None,
        }
    }
}
