//! Player-vs-monster combat

use tracing::debug;

use super::{CombatResult, melee_damage};
use crate::monster::Monster;
use crate::player::Player;
use crate::rng::BattleRng;

/// Player swings at the monster
///
/// Hits with `hit_chance`; a hit deals `max(1, attack - defense/2)`.
pub fn player_attack_monster(
    player: &Player,
    target: &mut Monster,
    hit_chance: f64,
    rng: &mut impl BattleRng,
) -> CombatResult {
    if !rng.chance(hit_chance) {
        debug!(monster = target.name(), "player attack missed");
        return CombatResult::MISS;
    }

    let damage = melee_damage(player.stats.attack, target.stats.defense);
    let dealt = target.stats.take_damage(damage);
    debug!(monster = target.name(), damage = dealt, hp = target.stats.hp, "player attack hit");
    CombatResult::hit(dealt, target.stats.is_defeated())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::MonsterKind;
    use crate::rng::ScriptedRng;

    fn test_player() -> Player {
        Player::sage("Terry")
    }

    #[test]
    fn test_attack_hits_on_low_roll() {
        let player = test_player();
        let mut slime = Monster::spawn(MonsterKind::Slime);
        let mut rng = ScriptedRng::new([0.5]);
        let result = player_attack_monster(&player, &mut slime, 0.95, &mut rng);
        // 15 - 3/2 = 14, overkill on 10 HP
        assert!(result.hit);
        assert_eq!(result.damage, 10);
        assert!(result.defender_died);
        assert_eq!(slime.stats.hp, 0);
    }

    #[test]
    fn test_attack_misses_on_high_roll() {
        let player = test_player();
        let mut slime = Monster::spawn(MonsterKind::Slime);
        let mut rng = ScriptedRng::new([0.96]);
        let result = player_attack_monster(&player, &mut slime, 0.95, &mut rng);
        assert_eq!(result, CombatResult::MISS);
        assert_eq!(slime.stats.hp, 10);
    }

    #[test]
    fn test_metal_defense_yields_one_damage() {
        let player = test_player();
        let mut metal = Monster::spawn(MonsterKind::MetalSlime);
        let mut rng = ScriptedRng::new([0.0]);
        let result = player_attack_monster(&player, &mut metal, 0.95, &mut rng);
        assert_eq!(result.damage, 1);
        assert_eq!(metal.stats.hp, 3);
    }
}
