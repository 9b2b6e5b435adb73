//! Player actions and where they come from

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{BattleState, RoundOutcome};
use crate::error::BattleError;

/// Who a spell is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSide {
    Caster,
    Enemy,
}

/// One player command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Attack,
    /// Cast by name; without a target, damage spells hit the enemy and
    /// everything else lands on the caster
    Cast {
        spell: String,
        target: Option<TargetSide>,
    },
    Flee,
}

impl Action {
    pub fn cast(spell: impl Into<String>) -> Self {
        Action::Cast {
            spell: spell.into(),
            target: None,
        }
    }

    pub fn cast_at(spell: impl Into<String>, target: TargetSide) -> Self {
        Action::Cast {
            spell: spell.into(),
            target: Some(target),
        }
    }
}

impl FromStr for Action {
    type Err = BattleError;

    /// Parse `attack`/`1`, `spell <name> [self|enemy]`/`2 <name>`, `flee`/`3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BattleError::InvalidAction(s.trim().to_string());
        let words: Vec<&str> = s.split_whitespace().collect();
        let Some((command, args)) = words.split_first() else {
            return Err(invalid());
        };

        match (command.to_lowercase().as_str(), args) {
            ("attack" | "a" | "1", []) => Ok(Action::Attack),
            ("flee" | "run" | "3", []) => Ok(Action::Flee),
            ("spell" | "cast" | "2", [spell]) => Ok(Action::cast(*spell)),
            ("spell" | "cast" | "2", [spell, target]) => {
                let target = match target.to_lowercase().as_str() {
                    "self" | "me" | "caster" => TargetSide::Caster,
                    "enemy" | "monster" | "foe" => TargetSide::Enemy,
                    _ => return Err(invalid()),
                };
                Ok(Action::cast_at(*spell, target))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Attack => write!(f, "attack"),
            Action::Cast { spell, target } => {
                write!(f, "spell {spell}")?;
                match target {
                    Some(TargetSide::Caster) => write!(f, " self"),
                    Some(TargetSide::Enemy) => write!(f, " enemy"),
                    None => Ok(()),
                }
            }
            Action::Flee => write!(f, "flee"),
        }
    }
}

/// Supplies actions to [`Battle::run`](super::Battle::run)
///
/// Returning `None` stops the battle loop without resolving the encounter.
pub trait ActionSource {
    fn next_action(&mut self, state: &BattleState) -> Option<Action>;

    /// Called after every resolved round
    fn on_round(&mut self, _outcome: &RoundOutcome) {}

    /// Called when an action is rejected; the source will be asked again
    fn on_rejected(&mut self, _error: &BattleError) {}
}

/// Replays a fixed list of actions, then stops
#[derive(Debug, Clone, Default)]
pub struct ScriptedActions {
    actions: VecDeque<Action>,
    rejected: Vec<BattleError>,
}

impl ScriptedActions {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            rejected: Vec::new(),
        }
    }

    /// Parse a comma-separated script such as `attack, spell Frizz, flee`
    pub fn parse(script: &str) -> Result<Self, BattleError> {
        let actions = script
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<Action>)
            .collect::<Result<Vec<Action>, _>>()?;
        Ok(Self::new(actions))
    }

    /// Actions not yet handed out
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }

    /// Errors reported for rejected actions, oldest first
    pub fn rejected(&self) -> &[BattleError] {
        &self.rejected
    }
}

impl ActionSource for ScriptedActions {
    fn next_action(&mut self, _state: &BattleState) -> Option<Action> {
        self.actions.pop_front()
    }

    fn on_rejected(&mut self, error: &BattleError) {
        self.rejected.push(error.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_numbers() {
        assert_eq!("1".parse::<Action>().unwrap(), Action::Attack);
        assert_eq!("3".parse::<Action>().unwrap(), Action::Flee);
        assert_eq!("2 Heal".parse::<Action>().unwrap(), Action::cast("Heal"));
    }

    #[test]
    fn test_parse_words() {
        assert_eq!("  Attack ".parse::<Action>().unwrap(), Action::Attack);
        assert_eq!(
            "cast frizz enemy".parse::<Action>().unwrap(),
            Action::cast_at("frizz", TargetSide::Enemy)
        );
        assert_eq!(
            "spell Heal self".parse::<Action>().unwrap(),
            Action::cast_at("Heal", TargetSide::Caster)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "dance", "4", "spell", "attack now", "spell Heal ally", "flee fast"] {
            let err = input.parse::<Action>().unwrap_err();
            assert!(matches!(err, BattleError::InvalidAction(_)), "{input:?}");
        }
    }

    #[test]
    fn test_display_parses_back() {
        for action in [
            Action::Attack,
            Action::Flee,
            Action::cast("Frizz"),
            Action::cast_at("Heal", TargetSide::Caster),
        ] {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_parse_script() {
        let script = ScriptedActions::parse("attack, 2 Frizz,, flee").unwrap();
        assert_eq!(script.remaining(), 3);
        assert!(ScriptedActions::parse("attack, dance").is_err());
    }
}
