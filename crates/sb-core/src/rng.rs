//! Random number generation for battles
//!
//! The engine draws every decision (hit, flee, escape, special ability,
//! encounter selection) from a [`BattleRng`]. [`GameRng`] is the seeded ChaCha
//! source used for play; [`ScriptedRng`] replays fixed rolls so a scenario can
//! be reproduced exactly.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of randomness consumed by the battle engine
pub trait BattleRng {
    /// Uniform roll in `[0, 1)`
    fn roll(&mut self) -> f64;

    /// Uniform index in `0..len`
    ///
    /// Returns 0 if len is 0.
    fn pick(&mut self, len: usize) -> usize;

    /// Returns true with the given probability
    ///
    /// Probabilities of 0 or 1 are decided without drawing a roll.
    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.roll() < probability
    }
}

impl<R: BattleRng + ?Sized> BattleRng for &mut R {
    fn roll(&mut self) -> f64 {
        (**self).roll()
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Game random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl BattleRng for GameRng {
    fn roll(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

const EXHAUSTED_ROLL: f64 = 0.999;

/// Replays a fixed list of rolls and picks
///
/// Once the script runs out, every roll returns 0.999 and every pick
/// returns 0, so an exhausted script fails any chance of 0.999 or less.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    rolls: VecDeque<f64>,
    picks: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            picks: VecDeque::new(),
        }
    }

    /// Queue encounter picks (indices into the bestiary)
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Number of scripted rolls not yet consumed
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Default for ScriptedRng {
    fn default() -> Self {
        Self::new([])
    }
}

impl BattleRng for ScriptedRng {
    fn roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(EXHAUSTED_ROLL)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.picks.pop_front().unwrap_or(0) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let r = rng.roll();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.pick(6), rng2.pick(6));
            assert_eq!(rng1.roll(), rng2.roll());
        }
    }

    #[test]
    fn test_zero_inputs() {
        let mut rng = GameRng::new(42);
        assert_eq!(rng.pick(0), 0);
    }

    #[test]
    fn test_certain_chances_skip_the_roll() {
        let mut rng = ScriptedRng::new([0.0]);
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_scripted_rolls_then_fallback() {
        let mut rng = ScriptedRng::new([0.1, 0.6]);
        assert!(rng.chance(0.5));
        assert!(!rng.chance(0.5));
        // Exhausted: every ordinary chance fails
        assert!(!rng.chance(0.95));
    }

    #[test]
    fn test_scripted_picks_wrap() {
        let mut rng = ScriptedRng::default().with_picks([7, 2]);
        assert_eq!(rng.pick(6), 1);
        assert_eq!(rng.pick(6), 2);
        assert_eq!(rng.pick(6), 0);
    }

    #[test]
    fn test_mut_ref_is_a_source() {
        fn draw(mut rng: impl BattleRng) -> f64 {
            rng.roll()
        }
        let mut rng = ScriptedRng::new([0.25]);
        assert_eq!(draw(&mut rng), 0.25);
        assert_eq!(rng.remaining(), 0);
    }
}
