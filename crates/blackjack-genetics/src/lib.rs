//! Genetic search over fixed-layout byte strings.
//!
//! A [`Chromosome`] is a byte string whose every position (locus) has its own
//! alphabet of legal symbols. The crate knows nothing about what the bytes mean:
//! callers supply the alphabets, decode chromosomes into whatever they encode, and
//! score them. The [`generation`] module turns a scored population into the next
//! one.
//!
//! # Evolution cycle
//!
//! 1. **Normalise**: every fitness is divided by the population maximum
//! 2. **Select**: candidates whose normalised fitness is below the cutoff are dropped
//! 3. **Parthenogenesis**: survivors are cloned with probability equal to their fitness
//! 4. **Crossover**: pairs of survivors mate with probability equal to the product
//!    of their fitnesses, producing a litter of offspring
//! 5. **Spontaneous generation**: remaining slots are filled with random chromosomes
//!
//! Every operator draws genes from the locus alphabets, so offspring are always
//! as decodable as their parents.
//!
//! # Randomness
//!
//! Every stochastic operation takes a [`Randomizer`](blackjack_random::Randomizer)
//! explicitly. Seeding it fixes the whole search.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use blackjack_genetics::{Alphabets, Candidate, GenerationEvolver};
//! use blackjack_random::SeededRandomizer;
//!
//! let alphabets: Alphabets = Arc::from(vec![&b"AB"[..]; 8]);
//! let evolver = GenerationEvolver {
//!     population_size: 10,
//!     ..GenerationEvolver::default()
//! };
//! let mut rng = SeededRandomizer::with_seed("00000000000000000000000000000007".parse().unwrap());
//!
//! // the first generation is entirely random
//! let population = evolver.evolve(&[], &alphabets, &mut rng);
//! assert_eq!(population.len(), 10);
//! assert!(population.iter().all(|c| !c.is_evaluated()));
//!
//! // score it and breed the next one
//! let scored = population
//!     .into_iter()
//!     .map(|c| {
//!         let ones = c.chromosome().genes().iter().filter(|g| **g == b'A').count();
//!         c.with_fitness(ones as f64)
//!     })
//!     .collect::<Vec<Candidate>>();
//! let next = evolver.evolve(&scored, &alphabets, &mut rng);
//! assert_eq!(next.len(), 10);
//! ```

pub use self::{chromosome::*, generation::*};

pub mod chromosome;
pub mod generation;

#[cfg(test)]
mod testing;
