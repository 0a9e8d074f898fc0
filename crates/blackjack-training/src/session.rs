//! The generation loop.

use std::sync::Arc;

use blackjack_engine::{Player, Shoe, Strategy, Table, TablePlayer, locus_alphabets};
use blackjack_genetics::{Alphabets, Candidate, Chromosome, GenerationEvolver, sort_by_fitness};
use blackjack_random::Randomizer;
use serde::{Deserialize, Serialize};

use crate::{TrainingError, fitness::FitnessFunction, report::GenerationReport};

/// Parameters of a training run.
///
/// Deserializes from a partial object; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    pub generations: usize,
    /// Decks in the shoe of every generation's table.
    pub decks: usize,
    /// Fraction of the shoe dealt before a reshuffle.
    pub penetration: f64,
    /// Rounds dealt to each generation, fewer if every player goes broke.
    pub hands_per_generation: usize,
    pub evolver: GenerationEvolver,
}

impl TrainingParams {
    /// Checks that the shoe settings can deal a full generation.
    pub fn validate(&self) -> Result<(), TrainingError> {
        Shoe::with_penetration(self.decks, self.penetration)?;
        Ok(())
    }
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            generations: 100,
            decks: 6,
            penetration: 0.5,
            hands_per_generation: 1000,
            evolver: GenerationEvolver::default(),
        }
    }
}

/// One generation after it was played out.
#[derive(Debug, Clone)]
pub struct EvaluatedGeneration {
    /// Scored candidates, best first.
    pub candidates: Vec<Candidate>,
    pub report: GenerationReport,
    /// Rounds the table actually dealt.
    pub rounds: usize,
}

impl EvaluatedGeneration {
    #[must_use]
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }
}

/// Drives the evolve, play, score loop.
#[derive(Debug)]
pub struct TrainingSession<F> {
    params: TrainingParams,
    fitness: F,
    alphabets: Alphabets,
}

impl<F> TrainingSession<F>
where
    F: FitnessFunction,
{
    /// Creates a session, rejecting parameters that fail [`TrainingParams::validate`].
    pub fn new(params: TrainingParams, fitness: F) -> Result<Self, TrainingError> {
        params.validate()?;
        Ok(Self {
            params,
            fitness,
            alphabets: Arc::from(locus_alphabets()),
        })
    }

    #[must_use]
    pub fn params(&self) -> &TrainingParams {
        &self.params
    }

    /// Runs every generation and returns the last one.
    ///
    /// `on_generation` is called after each generation with its zero-based index.
    pub fn run<R, C>(&self, rng: &mut R, mut on_generation: C) -> Result<EvaluatedGeneration, TrainingError>
    where
        R: Randomizer + ?Sized,
        C: FnMut(usize, &EvaluatedGeneration),
    {
        let mut last = EvaluatedGeneration {
            candidates: vec![],
            report: GenerationReport::default(),
            rounds: 0,
        };
        for generation in 0..self.params.generations {
            last = self.run_generation(&last.candidates, rng)?;
            log::info!(
                "generation {}/{}: {} rounds, {}",
                generation + 1,
                self.params.generations,
                last.rounds,
                last.report
            );
            on_generation(generation, &last);
        }
        Ok(last)
    }

    /// Breeds a generation from `previous`, plays it at a fresh table and scores it.
    pub fn run_generation<R>(
        &self,
        previous: &[Candidate],
        rng: &mut R,
    ) -> Result<EvaluatedGeneration, TrainingError>
    where
        R: Randomizer + ?Sized,
    {
        let population = self.params.evolver.evolve(previous, &self.alphabets, rng);
        let players = population
            .iter()
            .map(|candidate| {
                let strategy = Strategy::decode(candidate.chromosome().genes())?;
                Ok(Box::new(Player::new(strategy)) as Box<dyn TablePlayer>)
            })
            .collect::<Result<Vec<_>, TrainingError>>()?;

        let shoe = Shoe::with_penetration(self.params.decks, self.params.penetration)?;
        let mut table = Table::new(players, shoe);
        let rounds = table.run_many(self.params.hands_per_generation, rng)?;

        let statistics = table
            .players()
            .iter()
            .map(|player| player.statistics())
            .collect::<Vec<_>>();
        let fitnesses = statistics
            .iter()
            .map(|stats| self.fitness.fitness(stats))
            .collect::<Vec<_>>();
        let report = GenerationReport::from_scores(statistics.iter().zip(fitnesses.iter().copied()));

        let mut candidates = statistics
            .into_iter()
            .zip(fitnesses)
            .map(|(stats, fitness)| {
                Candidate::new(Chromosome::new(stats.strategy, Arc::clone(&self.alphabets)), fitness)
            })
            .collect::<Vec<_>>();
        sort_by_fitness(&mut candidates);

        Ok(EvaluatedGeneration {
            candidates,
            report,
            rounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use blackjack_random::{RandomSeed, SeededRandomizer};

    use super::*;
    use crate::fitness::BankrollFitness;

    fn small_params() -> TrainingParams {
        TrainingParams {
            generations: 3,
            decks: 4,
            penetration: 0.5,
            hands_per_generation: 50,
            evolver: GenerationEvolver {
                population_size: 12,
                ..GenerationEvolver::default()
            },
        }
    }

    fn seed() -> RandomSeed {
        "0123456789abcdef0123456789abcdef".parse().unwrap()
    }

    #[test]
    fn test_params_defaults() {
        let params = TrainingParams::default();
        assert_eq!(params.generations, 100);
        assert_eq!(params.decks, 6);
        assert!((params.penetration - 0.5).abs() < f64::EPSILON);
        assert_eq!(params.hands_per_generation, 1000);
        assert_eq!(params.evolver, GenerationEvolver::default());
    }

    #[test]
    fn test_params_from_partial_json() {
        let params: TrainingParams =
            serde_json::from_str(r#"{"generations": 5, "evolver": {"mutation_rate": 0.3}}"#)
                .unwrap();
        assert_eq!(params.generations, 5);
        assert_eq!(params.decks, 6);
        assert_eq!(params.evolver.population_size, 100);
        assert!((params.evolver.mutation_rate - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_run_generation_scores_every_candidate() {
        let session = TrainingSession::new(small_params(), BankrollFitness).unwrap();
        let mut rng = SeededRandomizer::with_seed(seed());
        let generation = session.run_generation(&[], &mut rng).unwrap();

        assert_eq!(generation.candidates.len(), 12);
        assert_eq!(generation.report.population, 12);
        assert!(generation.candidates.iter().all(Candidate::is_evaluated));
        assert!(
            generation
                .candidates
                .is_sorted_by(|a, b| a.fitness() >= b.fitness())
        );
        assert!(generation.rounds <= 50);
        for candidate in &generation.candidates {
            assert!(Strategy::decode(candidate.chromosome().genes()).is_ok());
        }
    }

    #[test]
    fn test_run_reports_every_generation() {
        let session = TrainingSession::new(small_params(), BankrollFitness).unwrap();
        let mut rng = SeededRandomizer::with_seed(seed());
        let mut seen = vec![];
        let last = session
            .run(&mut rng, |generation, evaluated| {
                seen.push((generation, evaluated.report.population));
            })
            .unwrap();

        assert_eq!(seen, [(0, 12), (1, 12), (2, 12)]);
        assert!(last.best().is_some());
    }

    #[test]
    fn test_run_is_deterministic_for_a_seed() {
        let session = TrainingSession::new(small_params(), BankrollFitness).unwrap();
        let a = session
            .run(&mut SeededRandomizer::with_seed(seed()), |_, _| {})
            .unwrap();
        let b = session
            .run(&mut SeededRandomizer::with_seed(seed()), |_, _| {})
            .unwrap();
        assert_eq!(a.candidates, b.candidates);
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_zero_generations() {
        let params = TrainingParams {
            generations: 0,
            ..small_params()
        };
        let session = TrainingSession::new(params, BankrollFitness).unwrap();
        let last = session
            .run(&mut SeededRandomizer::with_seed(seed()), |_, _| unreachable!())
            .unwrap();
        assert!(last.best().is_none());
    }

    #[test]
    fn test_empty_shoe_is_rejected() {
        let params = TrainingParams {
            decks: 0,
            ..small_params()
        };
        let err = TrainingSession::new(params, BankrollFitness).unwrap_err();
        assert!(matches!(err, TrainingError::Penetration(e) if e.is_no_room_for_round()));
    }

    #[test]
    fn test_out_of_range_penetration_is_rejected() {
        for penetration in [0.0, 1.0, 1.2] {
            let params = TrainingParams {
                penetration,
                ..small_params()
            };
            assert!(params.validate().is_err());
            let err = TrainingSession::new(params, BankrollFitness).unwrap_err();
            assert!(matches!(err, TrainingError::Penetration(e) if e.is_out_of_range()));
        }
    }
}
