//! Monster instances

use serde::{Deserialize, Serialize};

use super::{MonsterKind, MonsterTemplate, Portrait, SlimeColor, SpecialAbility, template};
use crate::magic::Element;
use crate::stats::Stats;

/// A monster in an encounter
///
/// Spawned fresh from its template; damage never touches the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub kind: MonsterKind,
    pub family: String,
    /// HP, attack, defense; `exp` holds the experience reward
    pub stats: Stats,
    pub weakness: Option<Element>,
    pub resistance: Option<Element>,
    pub special: Option<SpecialAbility>,
    pub escape_chance: f64,
    pub gold: u64,
    pub color: SlimeColor,
    pub portrait: Portrait,
}

impl Monster {
    /// Create a full-health instance of a template
    pub fn from_template(template: &MonsterTemplate) -> Self {
        let mut stats = Stats::new(template.kind.to_string(), template.hp, 0);
        stats.attack = template.attack;
        stats.defense = template.defense;
        stats.exp = template.exp;

        Self {
            kind: template.kind,
            family: template.family.to_string(),
            stats,
            weakness: template.weakness,
            resistance: template.resistance,
            special: template.special,
            escape_chance: template.escape_chance,
            gold: template.gold,
            color: template.color,
            portrait: template.portrait,
        }
    }

    /// Spawn a monster of the given family
    pub fn spawn(kind: MonsterKind) -> Self {
        Self::from_template(template(kind))
    }

    pub fn name(&self) -> &str {
        &self.stats.name
    }

    pub fn is_weak_to(&self, element: Element) -> bool {
        self.weakness == Some(element)
    }

    /// Experience granted for defeating this monster
    pub const fn exp_reward(&self) -> u64 {
        self.stats.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::BESTIARY;

    #[test]
    fn test_spawn_at_full_health() {
        for template in BESTIARY {
            let monster = Monster::from_template(template);
            assert_eq!(monster.stats.hp, template.hp);
            assert_eq!(monster.stats.hp_max, template.hp);
            assert_eq!(monster.stats.mp_max, 0);
        }
    }

    #[test]
    fn test_spawn_is_independent() {
        let mut first = Monster::spawn(MonsterKind::KingSlime);
        first.stats.take_damage(20);
        let second = Monster::spawn(MonsterKind::KingSlime);
        assert_eq!(second.stats.hp, 30);
        assert_eq!(first.stats.hp, 10);
    }

    #[test]
    fn test_metal_slime_stats() {
        let monster = Monster::spawn(MonsterKind::MetalSlime);
        assert_eq!(monster.name(), "Metal Slime");
        assert_eq!(monster.stats.defense, 255);
        assert_eq!(monster.exp_reward(), 500);
        assert_eq!(monster.gold, 6);
        assert!(monster.is_weak_to(Element::Fire));
        assert_eq!(monster.resistance, Some(Element::Water));
    }
}
