//! The fixed set of monsters an encounter draws from

use super::{MonsterKind, MonsterTemplate, Portrait, SlimeColor, SpecialAbility};
use crate::magic::Element;

const SLIME_FAMILY: &str = "slime";

/// All monster templates, in encounter-table order
pub static BESTIARY: &[MonsterTemplate] = &[
    // Slime
    MonsterTemplate {
        kind: MonsterKind::Slime,
        family: SLIME_FAMILY,
        hp: 10,
        attack: 5,
        defense: 3,
        exp: 1,
        gold: 1,
        weakness: Some(Element::Fire),
        resistance: Some(Element::Water),
        special: None,
        escape_chance: 0.0,
        color: SlimeColor::Blue,
        portrait: Portrait::Plain,
    },
    // Metal Slime
    MonsterTemplate {
        kind: MonsterKind::MetalSlime,
        family: SLIME_FAMILY,
        hp: 4,
        attack: 5,
        defense: 255,
        exp: 500,
        gold: 6,
        weakness: Some(Element::Fire),
        resistance: Some(Element::Water),
        special: Some(SpecialAbility::Evasive),
        escape_chance: 0.7,
        color: SlimeColor::Silver,
        portrait: Portrait::Metal,
    },
    // Liquid Metal Slime
    MonsterTemplate {
        kind: MonsterKind::LiquidMetalSlime,
        family: SLIME_FAMILY,
        hp: 6,
        attack: 5,
        defense: 255,
        exp: 2000,
        gold: 15,
        weakness: Some(Element::Fire),
        resistance: Some(Element::Water),
        special: Some(SpecialAbility::Evasive),
        escape_chance: 0.8,
        color: SlimeColor::Silver,
        portrait: Portrait::Metal,
    },
    // Poison Slime
    MonsterTemplate {
        kind: MonsterKind::PoisonSlime,
        family: SLIME_FAMILY,
        hp: 15,
        attack: 8,
        defense: 3,
        exp: 5,
        gold: 4,
        weakness: Some(Element::Fire),
        resistance: Some(Element::Water),
        special: Some(SpecialAbility::Poison),
        escape_chance: 0.0,
        color: SlimeColor::Purple,
        portrait: Portrait::Poison,
    },
    // King Slime
    MonsterTemplate {
        kind: MonsterKind::KingSlime,
        family: SLIME_FAMILY,
        hp: 30,
        attack: 15,
        defense: 8,
        exp: 28,
        gold: 15,
        weakness: Some(Element::Fire),
        resistance: Some(Element::Water),
        special: Some(SpecialAbility::Split),
        escape_chance: 0.0,
        color: SlimeColor::Blue,
        portrait: Portrait::King,
    },
    // Metal King Slime
    MonsterTemplate {
        kind: MonsterKind::MetalKingSlime,
        family: SLIME_FAMILY,
        hp: 8,
        attack: 10,
        defense: 255,
        exp: 5000,
        gold: 30,
        weakness: Some(Element::Fire),
        resistance: Some(Element::Water),
        special: Some(SpecialAbility::Evasive),
        escape_chance: 0.9,
        color: SlimeColor::Gold,
        portrait: Portrait::MetalKing,
    },
];

/// Look up the template for a monster family
pub fn template(kind: MonsterKind) -> &'static MonsterTemplate {
    // Every kind has exactly one entry, in declaration order
    &BESTIARY[kind as usize]
}
