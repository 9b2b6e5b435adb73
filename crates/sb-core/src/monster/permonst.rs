//! Monster templates

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::magic::Element;

/// Monster family
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum MonsterKind {
    Slime,
    #[strum(serialize = "Metal Slime")]
    MetalSlime,
    #[strum(serialize = "Liquid Metal Slime")]
    LiquidMetalSlime,
    #[strum(serialize = "Poison Slime")]
    PoisonSlime,
    #[strum(serialize = "King Slime")]
    KingSlime,
    #[strum(serialize = "Metal King Slime")]
    MetalKingSlime,
}

/// What a monster may do instead of a normal attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpecialAbility {
    /// Poisons the player; no direct damage
    Poison,
    /// Hits with double attack power
    Split,
    /// Prone to running away; attacks normally
    Evasive,
}

impl SpecialAbility {
    /// Short description for the encounter announcement
    pub const fn description(&self) -> &'static str {
        match self {
            SpecialAbility::Poison => "poison attack",
            SpecialAbility::Split => "split attack",
            SpecialAbility::Evasive => "runs away often",
        }
    }
}

/// Body color used when drawing the monster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SlimeColor {
    Blue,
    Silver,
    Gold,
    Purple,
}

/// Which picture to draw for a monster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Portrait {
    Plain,
    Metal,
    MetalKing,
    King,
    Poison,
}

/// Immutable stat record a monster is spawned from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonsterTemplate {
    pub kind: MonsterKind,

    /// Family label shown in the encounter announcement
    pub family: &'static str,

    // Combat
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,

    // Rewards
    pub exp: u64,
    pub gold: u64,

    pub weakness: Option<Element>,
    pub resistance: Option<Element>,
    pub special: Option<SpecialAbility>,

    /// Probability the monster runs away on its turn
    pub escape_chance: f64,

    // Presentation
    pub color: SlimeColor,
    pub portrait: Portrait,
}
