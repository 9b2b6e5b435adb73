//! Action sources for the terminal front end

use std::io::{self, BufRead, Write};

use sb_core::player::Player;
use sb_core::{
    Action, ActionSource, BattleError, BattleState, EncounterSnapshot, RoundOutcome,
    ScriptedActions,
};

use crate::display::{Renderer, player_status};

/// Decides whether the run moves on to another encounter
pub trait RunControl {
    fn another_encounter(&mut self) -> bool;
}

impl RunControl for ScriptedActions {
    /// Keep fighting while the script has actions left
    fn another_encounter(&mut self) -> bool {
        self.remaining() > 0
    }
}

/// Reads actions typed by the player
pub struct StdinActions<R, W> {
    input: R,
    prompt: W,
    renderer: Renderer,
}

impl<R: BufRead, W: Write> StdinActions<R, W> {
    pub fn new(input: R, prompt: W, renderer: Renderer) -> Self {
        Self {
            input,
            prompt,
            renderer,
        }
    }

    /// Next trimmed line, or `None` at end of input
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead, W: Write> ActionSource for StdinActions<R, W> {
    fn next_action(&mut self, state: &BattleState) -> Option<Action> {
        loop {
            write!(self.prompt, "\n{}", self.renderer.prompt(&state.player)).ok()?;
            self.prompt.flush().ok()?;

            let line = self.read_line()?;
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                return None;
            }
            match line.parse::<Action>() {
                Ok(action) => return Some(action),
                Err(err) => {
                    writeln!(self.prompt, "{err}").ok()?;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> RunControl for StdinActions<R, W> {
    fn another_encounter(&mut self) -> bool {
        loop {
            if write!(self.prompt, "\n1: continue   2: quit\n> ").is_err()
                || self.prompt.flush().is_err()
            {
                return false;
            }
            match self.read_line().as_deref() {
                Some("1" | "c" | "continue" | "") => return true,
                Some("2" | "q" | "quit") | None => return false,
                Some(_) => {}
            }
        }
    }
}

/// Wraps a source and narrates every round to `out`
///
/// With `json` set, each encounter and round is written as one JSON line.
pub struct Console<S, W> {
    source: S,
    out: W,
    renderer: Renderer,
    json: bool,
    error: Option<io::Error>,
}

impl<S, W: Write> Console<S, W> {
    pub fn new(source: S, out: W, renderer: Renderer, json: bool) -> Self {
        Self {
            source,
            out,
            renderer,
            json,
            error: None,
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[cfg(test)]
    fn into_parts(self) -> (S, W) {
        (self.source, self.out)
    }

    pub fn encounter(&mut self, snapshot: &EncounterSnapshot) -> io::Result<()> {
        if self.json {
            let line = serde_json::to_string(snapshot)?;
            writeln!(self.out, "{line}")
        } else {
            writeln!(self.out, "{}", self.renderer.encounter(snapshot))
        }
    }

    /// Closing summary once the run is over
    pub fn farewell(&mut self, player: &Player) -> io::Result<()> {
        if self.json {
            return Ok(());
        }
        if player.stats.is_defeated() {
            writeln!(self.out, "GAME OVER")?;
        }
        writeln!(self.out, "{}", player_status(player))
    }

    /// Surface the first write failure seen while narrating
    pub fn take_error(&mut self) -> io::Result<()> {
        self.error.take().map_or(Ok(()), Err)
    }

    fn write_round(&mut self, outcome: &RoundOutcome) -> io::Result<()> {
        if self.json {
            let line = serde_json::to_string(outcome)?;
            writeln!(self.out, "{line}")
        } else {
            writeln!(self.out, "{}", self.renderer.round(outcome))
        }
    }

    fn write_rejection(&mut self, error: &BattleError) -> io::Result<()> {
        if self.json {
            let line = serde_json::json!({ "error": error.to_string() });
            writeln!(self.out, "{line}")
        } else {
            writeln!(self.out, "{error}")
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }
}

impl<S: ActionSource, W: Write> ActionSource for Console<S, W> {
    fn next_action(&mut self, state: &BattleState) -> Option<Action> {
        if self.error.is_some() {
            return None;
        }
        self.source.next_action(state)
    }

    fn on_round(&mut self, outcome: &RoundOutcome) {
        let result = self.write_round(outcome);
        self.record(result);
        self.source.on_round(outcome);
    }

    fn on_rejected(&mut self, error: &BattleError) {
        let result = self.write_rejection(error);
        self.record(result);
        self.source.on_rejected(error);
    }
}
