//! Character classes

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::magic::SpellType;

/// Player character class
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Job {
    Adventurer,
    #[default]
    Sage,
}

/// Starting values or per-level gains for each stat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatBlock {
    pub hp: u32,
    pub mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic_attack: u32,
    pub magic_defense: u32,
}

impl Job {
    /// Stats at level 1
    pub const fn base_stats(&self) -> StatBlock {
        match self {
            Job::Adventurer => StatBlock {
                hp: 100,
                mp: 50,
                attack: 15,
                defense: 10,
                magic_attack: 1,
                magic_defense: 1,
            },
            Job::Sage => StatBlock {
                hp: 80,
                mp: 100,
                attack: 15,
                defense: 10,
                magic_attack: 25,
                magic_defense: 20,
            },
        }
    }

    /// Maxima raised on every level-up
    pub const fn growth(&self) -> StatBlock {
        match self {
            Job::Adventurer => StatBlock {
                hp: 5,
                mp: 3,
                attack: 2,
                defense: 2,
                magic_attack: 2,
                magic_defense: 2,
            },
            Job::Sage => StatBlock {
                hp: 5,
                mp: 8,
                attack: 2,
                defense: 2,
                magic_attack: 3,
                magic_defense: 2,
            },
        }
    }

    /// Whether this class learns spells as it levels
    pub const fn is_spellcaster(&self) -> bool {
        matches!(self, Job::Sage)
    }

    pub fn starting_spells(&self) -> Vec<SpellType> {
        match self {
            Job::Adventurer => Vec::new(),
            Job::Sage => vec![SpellType::Heal, SpellType::Frizz],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_sage_base_stats() {
        let base = Job::Sage.base_stats();
        assert_eq!(base.hp, 80);
        assert_eq!(base.mp, 100);
        assert_eq!(base.magic_attack, 25);
    }

    #[test]
    fn test_growth_schedules() {
        assert_eq!(Job::Sage.growth().mp, 8);
        assert_eq!(Job::Sage.growth().magic_attack, 3);
        assert_eq!(Job::Adventurer.growth().mp, 3);
        assert_eq!(Job::Adventurer.growth().magic_attack, 2);
    }

    #[test]
    fn test_only_sage_casts() {
        assert!(Job::Sage.is_spellcaster());
        assert!(!Job::Adventurer.is_spellcaster());
        assert!(Job::Adventurer.starting_spells().is_empty());
    }

    #[test]
    fn test_parse_job() {
        assert_eq!(Job::from_str("sage").unwrap(), Job::Sage);
        assert_eq!(Job::from_str("ADVENTURER").unwrap(), Job::Adventurer);
        assert!(Job::from_str("wizard").is_err());
    }

    #[test]
    fn test_job_names_match_serialized_form() {
        assert_eq!(Job::Sage.to_string(), "sage");
        assert_eq!(Job::Adventurer.to_string(), "adventurer");
        assert_eq!(serde_json::to_value(Job::Sage).unwrap(), "sage");
    }
}
