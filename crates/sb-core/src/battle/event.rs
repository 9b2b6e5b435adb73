//! Narrated battle events
//!
//! Every round produces a list of typed events. Front ends render them with
//! `Display`; tests match on the variants.

use std::fmt;

use serde::Serialize;

use crate::combat::StatusEffect;
use crate::magic::SpellType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    /// A landed physical attack
    Attack {
        attacker: String,
        target: String,
        damage: u32,
    },
    Miss {
        attacker: String,
    },
    SpellCast {
        caster: String,
        spell: SpellType,
        mp_spent: u32,
        message: String,
    },
    /// The spell's element matched the target's weakness
    WeaknessExploited {
        target: String,
    },
    /// Spell damage, including any weakness bonus
    Damage {
        target: String,
        amount: u32,
    },
    Healed {
        target: String,
        amount: u32,
    },
    AttackRaised {
        target: String,
        from: u32,
        to: u32,
    },
    SplitAttack {
        attacker: String,
        target: String,
        damage: u32,
    },
    StatusApplied {
        attacker: String,
        target: String,
        effect: StatusEffect,
        newly_applied: bool,
    },
    StatusDamage {
        target: String,
        effect: StatusEffect,
        damage: u32,
    },
    FleeSucceeded {
        name: String,
    },
    FleeFailed {
        name: String,
    },
    /// The monster ran away; the player keeps part of its experience
    MonsterEscaped {
        monster: String,
        exp: u64,
    },
    Defeated {
        monster: String,
    },
    Rewards {
        exp: u64,
        gold: u64,
    },
    LevelUp {
        name: String,
        level: u32,
        learned: Vec<SpellType>,
    },
    PlayerDefeated {
        name: String,
    },
}

impl BattleEvent {
    /// Whether the event ends the encounter
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            BattleEvent::FleeSucceeded { .. }
                | BattleEvent::MonsterEscaped { .. }
                | BattleEvent::Defeated { .. }
                | BattleEvent::PlayerDefeated { .. }
        )
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Attack {
                attacker,
                target,
                damage,
            } => write!(f, "{attacker} attacks! {target} takes {damage} damage!"),
            BattleEvent::Miss { attacker } => write!(f, "{attacker} attacks! But it missed!"),
            BattleEvent::SpellCast { message, .. } => write!(f, "{message}"),
            BattleEvent::WeaknessExploited { .. } => write!(f, "It's super effective!"),
            BattleEvent::Damage { target, amount } => {
                write!(f, "{target} takes {amount} damage!")
            }
            BattleEvent::Healed { target, amount } => write!(f, "{target} recovers {amount} HP!"),
            BattleEvent::AttackRaised { target, from, to } => {
                write!(f, "{target}'s attack rises from {from} to {to}!")
            }
            BattleEvent::SplitAttack {
                attacker,
                target,
                damage,
            } => write!(
                f,
                "{attacker} splits and strikes! {target} takes {damage} damage!"
            ),
            BattleEvent::StatusApplied {
                attacker,
                target,
                effect,
                newly_applied,
            } => {
                if *newly_applied {
                    write!(f, "{attacker} uses a {effect} attack! {target} is afflicted with {effect}!")
                } else {
                    write!(f, "{attacker} uses a {effect} attack! {target} already suffers from {effect}.")
                }
            }
            BattleEvent::StatusDamage {
                target,
                effect,
                damage,
            } => write!(f, "The {effect} hurts! {target} takes {damage} damage!"),
            BattleEvent::FleeSucceeded { name } => write!(f, "{name} ran away!"),
            BattleEvent::FleeFailed { name } => write!(f, "{name} couldn't get away!"),
            BattleEvent::MonsterEscaped { monster, exp } => {
                write!(f, "{monster} ran away... Gained {exp} EXP.")
            }
            BattleEvent::Defeated { monster } => write!(f, "{monster} is defeated!"),
            BattleEvent::Rewards { exp, gold } => write!(f, "Gained {exp} EXP and {gold} gold!"),
            BattleEvent::LevelUp {
                name,
                level,
                learned,
            } => {
                write!(f, "{name} reached level {level}!")?;
                for spell in learned {
                    write!(f, " Learned {spell}!")?;
                }
                Ok(())
            }
            BattleEvent::PlayerDefeated { name } => write!(f, "{name} has fallen..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_up_lists_spells() {
        let event = BattleEvent::LevelUp {
            name: "Terry".to_string(),
            level: 3,
            learned: vec![SpellType::Midheal, SpellType::Frizzle],
        };
        assert_eq!(
            event.to_string(),
            "Terry reached level 3! Learned Midheal! Learned Frizzle!"
        );
    }

    #[test]
    fn test_final_events() {
        assert!(
            BattleEvent::Defeated {
                monster: "Slime".to_string()
            }
            .is_final()
        );
        assert!(
            !BattleEvent::FleeFailed {
                name: "Terry".to_string()
            }
            .is_final()
        );
    }

    #[test]
    fn test_serializes_with_tag() {
        let event = BattleEvent::Miss {
            attacker: "Terry".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "miss");
        assert_eq!(json["attacker"], "Terry");
    }
}
