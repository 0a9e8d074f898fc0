//! Generation pipeline: from one scored population to the next.
//!
//! [`GenerationEvolver::evolve`] takes the previous generation's [`Candidate`]s
//! and returns a fresh, unevaluated population. See the crate documentation for
//! the order of the steps.
//!
//! Selection is fitness-proportional throughout: a candidate's normalised fitness
//! is directly its probability of being cloned, and the product of two
//! candidates' normalised fitnesses is their probability of mating. The cutoff
//! compares the normalised fitness itself against `cutoff_rate`, not a percentile
//! of the population.

use std::cmp::Ordering;

use blackjack_random::Randomizer;
use serde::{Deserialize, Serialize};

use crate::chromosome::{Alphabets, Chromosome};

/// Fitness of a candidate that has not been scored yet.
pub const UNEVALUATED: f64 = -1.0;

/// Fewest offspring a successful mating produces.
pub const MIN_LITTER_SIZE: usize = 1;
/// Most offspring a successful mating produces.
pub const MAX_LITTER_SIZE: usize = 10;

/// A chromosome together with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    chromosome: Chromosome,
    fitness: f64,
}

impl Candidate {
    /// Wraps a chromosome that has not been scored yet.
    #[must_use]
    pub fn unevaluated(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            fitness: UNEVALUATED,
        }
    }

    #[must_use]
    pub fn new(chromosome: Chromosome, fitness: f64) -> Self {
        Self {
            chromosome,
            fitness,
        }
    }

    #[must_use]
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    #[must_use]
    pub fn into_chromosome(self) -> Chromosome {
        self.chromosome
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.fitness != UNEVALUATED
    }

    #[must_use]
    pub fn with_fitness(self, fitness: f64) -> Self {
        Self { fitness, ..self }
    }
}

/// Orders candidates best first.
pub fn sort_by_fitness(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| descending(a.fitness, b.fitness));
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Divides every fitness by the population maximum.
///
/// The maximum is taken over the fitnesses and `0.0`, so an all-negative
/// population has no positive reference; in that case, and whenever the maximum is
/// not finite, every normalised fitness is `0.0`.
#[must_use]
pub fn normalize_fitness(candidates: &[Candidate]) -> Vec<Candidate> {
    let max = candidates
        .iter()
        .map(Candidate::fitness)
        .fold(0.0, f64::max);
    let usable = max > 0.0 && max.is_finite();

    candidates
        .iter()
        .map(|candidate| {
            let normalized = if usable { candidate.fitness / max } else { 0.0 };
            Candidate::new(candidate.chromosome.clone(), normalized)
        })
        .collect()
}

/// Parameters of the generation pipeline.
///
/// Deserializes from a partial object; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationEvolver {
    /// Number of candidates in every generation.
    pub population_size: usize,
    /// Per-locus probability of a redraw in offspring.
    pub mutation_rate: f64,
    /// Normalised fitness below which a candidate does not breed.
    pub cutoff_rate: f64,
}

impl Default for GenerationEvolver {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.1,
            cutoff_rate: 0.2,
        }
    }
}

impl GenerationEvolver {
    /// Breeds the next generation from `previous`.
    ///
    /// Returns exactly `population_size` unevaluated candidates: clones first, then
    /// offspring, then random chromosomes. If cloning and crossover produce more
    /// than `population_size`, the excess offspring are dropped.
    pub fn evolve<R>(
        &self,
        previous: &[Candidate],
        alphabets: &Alphabets,
        rng: &mut R,
    ) -> Vec<Candidate>
    where
        R: Randomizer + ?Sized,
    {
        let mut next = Vec::with_capacity(self.population_size);

        if !previous.is_empty() {
            let mut survivors = normalize_fitness(previous);
            sort_by_fitness(&mut survivors);
            survivors.retain(|candidate| candidate.fitness >= self.cutoff_rate);

            let clones = parthenogenesis(&survivors, rng);
            let offspring = self.crossover(&survivors, rng);
            log::debug!(
                "{} of {} candidates survived the cutoff: {} clones, {} offspring",
                survivors.len(),
                previous.len(),
                clones.len(),
                offspring.len()
            );

            next.extend(clones);
            next.extend(offspring);
            next.truncate(self.population_size);
        }

        let spontaneous = self.population_size - next.len();
        next.extend(
            (0..spontaneous)
                .map(|_| Candidate::unevaluated(Chromosome::random(alphabets.clone(), rng))),
        );
        next
    }

    fn crossover<R>(&self, survivors: &[Candidate], rng: &mut R) -> Vec<Candidate>
    where
        R: Randomizer + ?Sized,
    {
        let mut offspring = vec![];
        for (i, a) in survivors.iter().enumerate() {
            for b in &survivors[i + 1..] {
                if !rng.event_did_happen(a.fitness * b.fitness) {
                    continue;
                }
                let litter_size = rng.number_between(MIN_LITTER_SIZE, MAX_LITTER_SIZE);
                for _ in 0..litter_size {
                    let child = a.chromosome.merge(&b.chromosome, self.mutation_rate, rng);
                    offspring.push(Candidate::unevaluated(child));
                }
            }
        }
        offspring
    }
}

fn parthenogenesis<R>(survivors: &[Candidate], rng: &mut R) -> Vec<Candidate>
where
    R: Randomizer + ?Sized,
{
    survivors
        .iter()
        .filter(|candidate| rng.event_did_happen(candidate.fitness))
        .map(|candidate| Candidate::unevaluated(candidate.chromosome.clone()))
        .collect()
}
