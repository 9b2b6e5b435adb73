//! Spellbook and spell effects
//!
//! Every spell is a fixed record: MP cost, effect kind, magnitude and the
//! level at which a spellcaster learns it. Effects act on a target [`Stats`];
//! weakness doubling is left to the battle layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::stats::Stats;

/// Every spell in the spellbook
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
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum SpellType {
    Heal,
    Frizz,
    Midheal,
    Frizzle,
    Fullheal,
    Kafrizzle,
    Zoom,
    Oomph,
    Bounce,
    Zing,
}

/// What a spell does when it resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpellKind {
    Heal,
    Damage,
    Buff,
    Utility,
    Revive,
}

/// Elemental affinity used for weaknesses and resistances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Element {
    Fire,
    Water,
}

impl SpellType {
    /// Get the MP cost to cast
    pub const fn cost(&self) -> u32 {
        match self {
            SpellType::Heal => 4,
            SpellType::Frizz => 5,
            SpellType::Midheal => 10,
            SpellType::Frizzle => 12,
            SpellType::Fullheal => 20,
            SpellType::Kafrizzle => 25,
            SpellType::Zoom => 8,
            SpellType::Oomph => 15,
            SpellType::Bounce => 30,
            SpellType::Zing => 50,
        }
    }

    pub const fn kind(&self) -> SpellKind {
        match self {
            SpellType::Heal | SpellType::Midheal | SpellType::Fullheal => SpellKind::Heal,
            SpellType::Frizz | SpellType::Frizzle | SpellType::Kafrizzle => SpellKind::Damage,
            SpellType::Oomph => SpellKind::Buff,
            SpellType::Zoom | SpellType::Bounce => SpellKind::Utility,
            SpellType::Zing => SpellKind::Revive,
        }
    }

    /// HP healed, base damage dealt, or attack multiplier; 0 for narrative spells
    pub const fn magnitude(&self) -> u32 {
        match self {
            SpellType::Heal => 30,
            SpellType::Frizz => 30,
            SpellType::Midheal => 75,
            SpellType::Frizzle => 70,
            SpellType::Fullheal => 200,
            SpellType::Kafrizzle => 150,
            SpellType::Oomph => 2,
            SpellType::Zoom | SpellType::Bounce | SpellType::Zing => 0,
        }
    }

    /// Level at which a spellcaster learns this spell
    pub const fn unlock_level(&self) -> u32 {
        match self {
            SpellType::Heal | SpellType::Frizz => 1,
            SpellType::Midheal | SpellType::Frizzle => 3,
            SpellType::Fullheal | SpellType::Kafrizzle => 5,
            SpellType::Zoom => 7,
            SpellType::Oomph | SpellType::Bounce => 10,
            SpellType::Zing => 15,
        }
    }

    /// Element carried by the spell's damage
    pub const fn element(&self) -> Option<Element> {
        match self.kind() {
            SpellKind::Damage => Some(Element::Fire),
            _ => None,
        }
    }

    /// Whether the spell acts on the enemy when no target is named
    pub const fn targets_enemy(&self) -> bool {
        matches!(self.kind(), SpellKind::Damage)
    }

    /// Size label for fire damage
    const fn power_tier(&self) -> &'static str {
        match self {
            SpellType::Frizz => "small",
            SpellType::Frizzle => "medium",
            _ => "large",
        }
    }
}

/// Spells that become available on reaching the given level
pub fn spells_unlocked_at(level: u32) -> Vec<SpellType> {
    SpellType::iter()
        .filter(|spell| spell.unlock_level() == level)
        .collect()
}

/// Effect of a resolved spell on its target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SpellOutcome {
    Healed {
        target: String,
        amount: u32,
    },
    Damaged {
        target: String,
        amount: u32,
        element: Element,
        defeated: bool,
    },
    AttackRaised {
        target: String,
        from: u32,
        to: u32,
    },
    /// No stat change
    Narrative,
}

/// Result of a successful cast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellResult {
    pub spell: SpellType,
    pub mp_spent: u32,
    pub outcome: SpellOutcome,
    /// Narration for presentation
    pub message: String,
}

/// Apply a spell's effect
///
/// MP has already been paid. `target` is `None` when the spell was cast
/// with nothing to act on, which leaves every spell narrative-only.
pub fn apply_spell(caster: &str, spell: SpellType, target: Option<&mut Stats>) -> SpellResult {
    let (outcome, message) = match (spell.kind(), target) {
        (SpellKind::Heal, Some(target)) => {
            let amount = target.heal(spell.magnitude());
            let message = format!("{} recovers {} HP!", target.name, amount);
            let outcome = SpellOutcome::Healed {
                target: target.name.clone(),
                amount,
            };
            (outcome, message)
        }
        (SpellKind::Damage, Some(target)) => {
            let amount = target.take_damage(spell.magnitude());
            let message = format!(
                "{} casts {}! Fire damage ({}) to {}.",
                caster,
                spell,
                spell.power_tier(),
                target.name
            );
            let outcome = SpellOutcome::Damaged {
                target: target.name.clone(),
                amount,
                element: Element::Fire,
                defeated: target.is_defeated(),
            };
            (outcome, message)
        }
        (SpellKind::Buff, Some(target)) => {
            let from = target.attack;
            target.attack = from.saturating_mul(spell.magnitude());
            let message = format!("{}'s attack doubled!", target.name);
            let outcome = SpellOutcome::AttackRaised {
                target: target.name.clone(),
                from,
                to: target.attack,
            };
            (outcome, message)
        }
        (kind, _) => (SpellOutcome::Narrative, narration(caster, spell, kind)),
    };

    SpellResult {
        spell,
        mp_spent: spell.cost(),
        outcome,
        message,
    }
}

fn narration(caster: &str, spell: SpellType, kind: SpellKind) -> String {
    match spell {
        SpellType::Zoom => format!("{caster} casts Zoom! You could fly anywhere from here."),
        SpellType::Bounce => format!("{caster} raises a barrier that reflects spells!"),
        SpellType::Zing => format!("{caster} chants a spell of revival!"),
        _ => format!("{caster} casts {spell}, but there is nothing to {kind}."),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn test_target() -> Stats {
        let mut stats = Stats::new("Slime", 100, 0);
        stats.attack = 5;
        stats
    }

    #[test]
    fn test_spellbook_table() {
        assert_eq!(SpellType::Frizz.cost(), 5);
        assert_eq!(SpellType::Frizz.magnitude(), 30);
        assert_eq!(SpellType::Kafrizzle.magnitude(), 150);
        assert_eq!(SpellType::Zing.cost(), 50);
        assert_eq!(SpellType::Oomph.kind(), SpellKind::Buff);
        assert_eq!(SpellType::Zing.kind(), SpellKind::Revive);
    }

    #[test]
    fn test_only_damage_spells_are_fire() {
        for spell in SpellType::iter() {
            assert_eq!(
                spell.element().is_some(),
                spell.kind() == SpellKind::Damage,
                "{spell}"
            );
        }
    }

    #[test]
    fn test_unlock_schedule() {
        assert_eq!(
            spells_unlocked_at(3),
            vec![SpellType::Midheal, SpellType::Frizzle]
        );
        assert_eq!(spells_unlocked_at(7), vec![SpellType::Zoom]);
        assert_eq!(
            spells_unlocked_at(10),
            vec![SpellType::Oomph, SpellType::Bounce]
        );
        assert!(spells_unlocked_at(2).is_empty());
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(SpellType::from_str("frizz").unwrap(), SpellType::Frizz);
        assert_eq!(SpellType::from_str("KAFRIZZLE").unwrap(), SpellType::Kafrizzle);
        assert!(SpellType::from_str("fireball").is_err());
    }

    #[test]
    fn test_heal_clamps() {
        let mut target = test_target();
        target.hp = 90;
        let result = apply_spell("Sage", SpellType::Heal, Some(&mut target));
        assert_eq!(target.hp, 100);
        assert_eq!(
            result.outcome,
            SpellOutcome::Healed {
                target: "Slime".to_string(),
                amount: 10
            }
        );
    }

    #[test]
    fn test_damage_is_base_magnitude() {
        let mut target = test_target();
        let result = apply_spell("Sage", SpellType::Frizz, Some(&mut target));
        assert_eq!(target.hp, 70);
        assert_eq!(result.mp_spent, 5);
        assert!(matches!(
            result.outcome,
            SpellOutcome::Damaged {
                amount: 30,
                defeated: false,
                ..
            }
        ));
    }

    #[test]
    fn test_buff_doubles_attack() {
        let mut target = test_target();
        apply_spell("Sage", SpellType::Oomph, Some(&mut target));
        assert_eq!(target.attack, 10);
        apply_spell("Sage", SpellType::Oomph, Some(&mut target));
        assert_eq!(target.attack, 20);
    }

    #[test]
    fn test_narrative_spells_change_nothing() {
        let mut target = test_target();
        let before = target.clone();
        for spell in [SpellType::Zoom, SpellType::Bounce, SpellType::Zing] {
            let result = apply_spell("Sage", spell, Some(&mut target));
            assert_eq!(result.outcome, SpellOutcome::Narrative);
            assert!(!result.message.is_empty());
        }
        assert_eq!(target, before);
    }

    #[test]
    fn test_damage_without_target_is_narrative() {
        let result = apply_spell("Sage", SpellType::Frizzle, None);
        assert_eq!(result.outcome, SpellOutcome::Narrative);
    }
}
