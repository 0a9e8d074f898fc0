//! Injectable randomness for the simulator and the genetic engine.
//!
//! Every stochastic step in the workspace (shoe shuffling, chromosome crossover and
//! mutation, candidate selection) draws from a [`Randomizer`] passed in by the caller.
//! Nothing reaches for a process-global generator, so a run is fully reproducible
//! from its [`RandomSeed`] and tests can substitute scripted sequences.
//!
//! # Example
//!
//! ```
//! use blackjack_random::{RandomSeed, Randomizer as _, SeededRandomizer};
//!
//! let seed: RandomSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
//! let mut a = SeededRandomizer::with_seed(seed);
//! let mut b = SeededRandomizer::with_seed(seed);
//!
//! assert_eq!(a.pick_one(b"HSDP"), b.pick_one(b"HSDP"));
//! assert_eq!(a.number_between(1, 10), b.number_between(1, 10));
//! ```

use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Source of random decisions used throughout the simulation.
///
/// The three operations mirror what the genetic engine and the shoe need; test
/// doubles implement this trait directly to script outcomes.
pub trait Randomizer {
    /// Returns `true` with the given probability.
    ///
    /// Probabilities at or below `0.0` never happen, at or above `1.0` always happen.
    fn event_did_happen(&mut self, probability: f64) -> bool;

    /// Picks one symbol uniformly from `alphabet`.
    ///
    /// # Panics
    ///
    /// Panics if `alphabet` is empty.
    fn pick_one(&mut self, alphabet: &[u8]) -> u8;

    /// Picks an integer uniformly from `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    fn number_between(&mut self, min: usize, max: usize) -> usize;
}

impl<R> Randomizer for &mut R
where
    R: Randomizer + ?Sized,
{
    fn event_did_happen(&mut self, probability: f64) -> bool {
        (**self).event_did_happen(probability)
    }

    fn pick_one(&mut self, alphabet: &[u8]) -> u8 {
        (**self).pick_one(alphabet)
    }

    fn number_between(&mut self, min: usize, max: usize) -> usize {
        (**self).number_between(min, max)
    }
}

/// Seed for deterministic simulation runs.
///
/// A 128-bit seed rendered as 32 hex characters (big-endian). The same seed always
/// produces the same shuffles, the same offspring and the same selection outcomes.
///
/// # Example
///
/// ```
/// use blackjack_random::RandomSeed;
/// use rand::Rng as _;
///
/// let seed: RandomSeed = rand::rng().random();
/// let parsed: RandomSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: expected 32 hex characters, got {input:?}")]
pub struct RandomSeedParseError {
    input: String,
}

impl FromStr for RandomSeed {
    type Err = RandomSeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || RandomSeedParseError {
            input: s.to_owned(),
        };
        // from_str_radix alone would accept a leading '+'
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl fmt::Display for RandomSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for RandomSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RandomSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `RandomSeed` values with `rng.random()`.
impl Distribution<RandomSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RandomSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        RandomSeed(seed)
    }
}

/// Production [`Randomizer`] backed by a PCG generator.
#[derive(Debug, Clone)]
pub struct SeededRandomizer {
    seed: RandomSeed,
    rng: Pcg32,
}

impl Default for SeededRandomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SeededRandomizer {
    /// Creates a randomizer seeded from the thread-local generator.
    ///
    /// Use [`Self::with_seed`] for reproducible runs; the chosen seed is available
    /// through [`Self::seed`] either way.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: RandomSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    #[must_use]
    pub fn seed(&self) -> RandomSeed {
        self.seed
    }
}

impl Randomizer for SeededRandomizer {
    fn event_did_happen(&mut self, probability: f64) -> bool {
        // random() is in [0, 1): a probability of 0 never fires, 1 always does
        self.rng.random::<f64>() < probability
    }

    fn pick_one(&mut self, alphabet: &[u8]) -> u8 {
        *alphabet
            .choose(&mut self.rng)
            .expect("alphabet must not be empty")
    }

    fn number_between(&mut self, min: usize, max: usize) -> usize {
        self.rng.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> RandomSeed {
        RandomSeed(bytes)
    }

    fn fixed_seed() -> RandomSeed {
        seed_from_bytes([0x5e; 16])
    }

    #[test]
    fn test_known_value_sequential_bytes() {
        let seed = seed_from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

        let deserialized: RandomSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_parse_uppercase_hex() {
        let seed: RandomSeed = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF".parse().unwrap();
        assert_eq!(seed.0, [0xFF; 16]);
    }

    #[test]
    fn test_parse_errors() {
        for input in [
            "",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
            "+123456789abcdef0123456789abcdef",
        ] {
            let err = input.parse::<RandomSeed>().unwrap_err();
            assert!(err.to_string().contains("invalid hex seed"), "{input:?}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = fixed_seed();
        let mut a = SeededRandomizer::with_seed(seed);
        let mut b = SeededRandomizer::with_seed(seed);

        for _ in 0..50 {
            assert_eq!(a.event_did_happen(0.5), b.event_did_happen(0.5));
            assert_eq!(a.pick_one(b"0123456789ABCDEF"), b.pick_one(b"0123456789ABCDEF"));
            assert_eq!(a.number_between(0, 51), b.number_between(0, 51));
        }
    }

    #[test]
    fn test_probability_bounds() {
        let mut rng = SeededRandomizer::with_seed(fixed_seed());
        for _ in 0..1000 {
            assert!(!rng.event_did_happen(0.0));
            assert!(rng.event_did_happen(1.0));
        }
    }

    #[test]
    fn test_number_between_is_inclusive() {
        let mut rng = SeededRandomizer::with_seed(fixed_seed());
        let mut seen = [false; 10];
        for _ in 0..2000 {
            let n = rng.number_between(1, 10);
            assert!((1..=10).contains(&n));
            seen[n - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(rng.number_between(7, 7), 7);
    }

    #[test]
    fn test_pick_one_stays_in_alphabet() {
        let mut rng = SeededRandomizer::with_seed(fixed_seed());
        for _ in 0..200 {
            assert!(b"HSDP".contains(&rng.pick_one(b"HSDP")));
        }
    }
}
