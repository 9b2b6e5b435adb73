//! Terminal rendering of encounters and rounds
//!
//! Everything here builds strings; `main` decides where they go.

use crossterm::style::{Color, Stylize};

use sb_core::monster::{Monster, Portrait, SlimeColor};
use sb_core::player::Player;
use sb_core::{BattleState, EncounterSnapshot, RoundOutcome};

const RULE: &str = "==================================================";

/// ASCII picture for each portrait style
pub const fn portrait(portrait: Portrait) -> &'static str {
    match portrait {
        Portrait::Plain => concat!(
            "      .----.\n",
            "     / o  o \\\n",
            "    |   vv   |\n",
            "     \\______/\n",
        ),
        Portrait::Metal => concat!(
            "      .----.\n",
            "     / @  @ \\\n",
            "    |   vv   |\n",
            "     \\__**__/\n",
        ),
        Portrait::MetalKing => concat!(
            "      _/\\/\\_\n",
            "     / @  @ \\\n",
            "    |   vv   |\n",
            "     \\__**__/\n",
        ),
        Portrait::King => concat!(
            "      _/\\/\\_\n",
            "     / o  o \\\n",
            "    |   vv   |\n",
            "     \\__##__/\n",
        ),
        Portrait::Poison => concat!(
            "      .----.\n",
            "     / x  x \\\n",
            "    |   ~~   |\n",
            "     \\_~~~~_/\n",
        ),
    }
}

/// Terminal color for a slime's body
pub const fn slime_color(color: SlimeColor) -> Color {
    match color {
        SlimeColor::Blue => Color::Blue,
        SlimeColor::Silver => Color::Grey,
        SlimeColor::Gold => Color::Yellow,
        SlimeColor::Purple => Color::Magenta,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub color: bool,
    pub verbose: bool,
}

impl Renderer {
    pub fn new(color: bool, verbose: bool) -> Self {
        Self { color, verbose }
    }

    /// The monster's picture, colored when enabled
    pub fn monster_portrait(&self, monster: &Monster) -> String {
        let art = portrait(monster.portrait);
        if self.color {
            art.with(slime_color(monster.color)).to_string()
        } else {
            art.to_string()
        }
    }

    /// Announcement and details for a new encounter
    pub fn encounter(&self, snapshot: &EncounterSnapshot) -> String {
        let monster = &snapshot.monster;
        let mut lines = vec![RULE.to_string(), self.emphasize(&snapshot.message)];
        lines.push(format!("  Family:     {}", monster.family));
        lines.push(format!("  HP:         {}", monster.stats.hp));
        lines.push(format!("  Attack:     {}", monster.stats.attack));
        lines.push(format!("  Defense:    {}", monster.stats.defense));
        if let Some(special) = monster.special {
            lines.push(format!("  Special:    {}", special.description()));
        }
        lines.push(format!("  Weakness:   {}", describe(monster.weakness)));
        lines.push(format!("  Resistance: {}", describe(monster.resistance)));
        lines.push(self.monster_portrait(monster));
        lines.join("\n")
    }

    /// Narration for one round, with a status panel in verbose mode
    ///
    /// The event that ends the encounter is emphasized.
    pub fn round(&self, outcome: &RoundOutcome) -> String {
        let mut lines = vec![format!("{:-^50}", format!(" Turn {} ", outcome.turn))];
        for event in &outcome.events {
            let text = event.to_string();
            if event.is_final() {
                lines.push(self.emphasize(&text));
            } else {
                lines.push(text);
            }
        }
        if self.verbose && !outcome.is_terminal() {
            lines.push(self.status(&outcome.state));
        }
        lines.join("\n")
    }

    /// Both combatants' vitals
    pub fn status(&self, state: &BattleState) -> String {
        let mut lines = vec![RULE.to_string(), player_status(&state.player)];
        if let Some(monster) = &state.monster {
            lines.push(format!(
                "[{}] HP: {}/{}",
                monster.name(),
                monster.stats.hp,
                monster.stats.hp_max
            ));
        }
        lines.push(RULE.to_string());
        lines.join("\n")
    }

    /// Command menu for the player's turn
    pub fn prompt(&self, player: &Player) -> String {
        let spells = player
            .spells
            .iter()
            .map(|s| format!("{s} ({} MP)", s.cost()))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}\n1: attack   2: spell <name> [self|enemy]   3: flee\nSpells: {}\n> ",
            player_status(player),
            if spells.is_empty() { "none" } else { spells.as_str() }
        )
    }

    fn emphasize(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// One-line summary of the player's condition
pub fn player_status(player: &Player) -> String {
    let stats = &player.stats;
    let mut line = format!(
        "[{} Lv{}] HP: {}/{}  MP: {}/{}  EXP: {}  Gold: {}",
        stats.name,
        stats.level,
        stats.hp,
        stats.hp_max,
        stats.mp,
        stats.mp_max,
        stats.exp,
        player.gold
    );
    if !stats.status.is_empty() {
        let effects = stats
            .status
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        line.push_str(&format!("  Status: {effects}"));
    }
    line
}

fn describe<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_core::combat::StatusEffect;
    use sb_core::monster::MonsterKind;
    use sb_core::{Action, Battle, ScriptedRng};

    fn plain() -> Renderer {
        Renderer::new(false, false)
    }

    #[test]
    fn test_portrait_per_kind() {
        let king = Monster::spawn(MonsterKind::KingSlime);
        let metal_king = Monster::spawn(MonsterKind::MetalKingSlime);
        assert!(plain().monster_portrait(&king).contains("_/\\/\\_"));
        assert!(plain().monster_portrait(&metal_king).contains('@'));
        assert!(portrait(Portrait::Poison).contains("x  x"));
    }

    #[test]
    fn test_color_wraps_portrait() {
        let slime = Monster::spawn(MonsterKind::Slime);
        let colored = Renderer::new(true, false).monster_portrait(&slime);
        assert!(colored.contains(portrait(Portrait::Plain)));
    }

    #[test]
    fn test_round_emphasizes_final_event() {
        let mut player = Player::sage("Terry");
        let mut battle = Battle::new(&mut player, ScriptedRng::new([0.0]));
        battle.start_encounter_with(MonsterKind::Slime).unwrap();
        let outcome = battle.submit_action(Action::Attack).unwrap();

        let plain_text = plain().round(&outcome);
        assert!(plain_text.contains("Turn 1"));
        assert!(plain_text.contains("\nSlime is defeated!\n"));

        let styled = Renderer::new(true, false).round(&outcome);
        assert!(styled.contains(&"Slime is defeated!".bold().to_string()));
    }

    #[test]
    fn test_slime_colors() {
        assert_eq!(slime_color(SlimeColor::Gold), Color::Yellow);
        assert_eq!(slime_color(SlimeColor::Purple), Color::Magenta);
    }

    #[test]
    fn test_player_status_lists_effects() {
        let mut player = Player::sage("Terry");
        assert!(!player_status(&player).contains("Status"));
        player.stats.status.apply(StatusEffect::Poison);
        assert!(player_status(&player).ends_with("Status: poison"));
    }

    #[test]
    fn test_prompt_lists_spell_costs() {
        let player = Player::sage("Terry");
        let prompt = plain().prompt(&player);
        assert!(prompt.contains("Heal (4 MP)"));
        assert!(prompt.contains("Frizz (5 MP)"));
    }
}
