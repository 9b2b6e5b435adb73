//! Battle options and configuration
//!
//! Reads and writes the rc-file format:
//!
//! ```text
//! # comment
//! OPTIONS=name:Terry,job:sage,color,!verbose
//! OPTIONS=seed:42,hit_chance:0.95
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::battle::Rules;
use crate::consts::{FLEE_CHANCE, PLAYER_HIT_CHANCE, SPECIAL_ABILITY_CHANCE};
use crate::player::Job;

/// User-configurable options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOptions {
    // Character options
    pub name: String,
    pub job: Job,

    // Display options
    pub color: bool,
    pub verbose: bool,

    /// Fixed RNG seed; random when unset
    pub seed: Option<u64>,

    // Balance options
    pub hit_chance: f64,
    pub flee_chance: f64,
    pub special_chance: f64,
}

impl Default for BattleOptions {
    fn default() -> Self {
        Self {
            name: "Hero".to_string(),
            job: Job::Sage,
            color: true,
            verbose: false,
            seed: None,
            hit_chance: PLAYER_HIT_CHANCE,
            flee_chance: FLEE_CHANCE,
            special_chance: SPECIAL_ABILITY_CHANCE,
        }
    }
}

impl BattleOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for (number, line) in contents.lines().enumerate() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(opts) = line.strip_prefix("OPTIONS=") else {
                return Err(OptionsError::ParseError(format!(
                    "line {}: expected OPTIONS=",
                    number + 1
                )));
            };
            for opt in opts.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                options.parse_option(opt)?;
            }
        }

        Ok(options)
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if let Some(name) = opt.strip_prefix('!') {
            return self.set_bool_option(name.trim(), false);
        }

        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }

        self.set_bool_option(opt, true)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "color" => self.color = value,
            "verbose" => self.verbose = value,
            "name" | "job" | "seed" | "hit_chance" | "flee_chance" | "special_chance" => {
                return Err(OptionsError::MissingValue(name.to_string()));
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }

        match name {
            "name" => self.name = value.to_string(),
            "job" | "role" => self.job = value.parse().map_err(|_| invalid())?,
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            "hit_chance" => self.hit_chance = parse_probability(value).ok_or_else(invalid)?,
            "flee_chance" => self.flee_chance = parse_probability(value).ok_or_else(invalid)?,
            "special_chance" => {
                self.special_chance = parse_probability(value).ok_or_else(invalid)?
            }
            "color" | "verbose" => {
                let flag = match value.to_lowercase().as_str() {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => return Err(invalid()),
                };
                return self.set_bool_option(name, flag);
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let mut lines = Vec::new();
        lines.push("# Slime Battle configuration file".to_string());
        lines.push(String::new());

        // Character options
        lines.push(format!("OPTIONS=name:{}", self.name));
        lines.push(format!("OPTIONS=job:{}", self.job));

        lines.push(String::new());
        lines.push("# Display options".to_string());
        lines.push(format!(
            "OPTIONS={}",
            if self.color { "color" } else { "!color" }
        ));
        lines.push(format!(
            "OPTIONS={}",
            if self.verbose { "verbose" } else { "!verbose" }
        ));

        lines.push(String::new());
        lines.push("# Balance options".to_string());
        if let Some(seed) = self.seed {
            lines.push(format!("OPTIONS=seed:{seed}"));
        }
        lines.push(format!(
            "OPTIONS=hit_chance:{},flee_chance:{},special_chance:{}",
            self.hit_chance, self.flee_chance, self.special_chance
        ));

        lines.join("\n") + "\n"
    }

    /// Combat probabilities for the battle engine
    pub fn rules(&self) -> Rules {
        Rules {
            hit_chance: self.hit_chance,
            flee_chance: self.flee_chance,
            special_chance: self.special_chance,
        }
    }
}

fn parse_probability(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|p| (0.0..=1.0).contains(p))
}

/// Options parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}
