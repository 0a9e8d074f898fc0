use std::{fs, path::PathBuf};

use anyhow::Context as _;
use blackjack_engine::Strategy;
use blackjack_random::{RandomSeed, SeededRandomizer};
use blackjack_training::{BankrollFitness, EvaluatedGeneration, TrainingParams, TrainingSession};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// JSON file with training parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    generations: Option<usize>,
    #[arg(long)]
    population_size: Option<usize>,
    #[arg(long)]
    mutation_rate: Option<f64>,
    #[arg(long)]
    cutoff_rate: Option<f64>,
    #[arg(long)]
    decks: Option<usize>,
    #[arg(long)]
    penetration: Option<f64>,
    /// Rounds dealt to each generation
    #[arg(long)]
    hands: Option<usize>,
    /// 32 hex digit seed; random if omitted
    #[arg(long)]
    seed: Option<RandomSeed>,
    /// Write the best strategy here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn params(&self) -> anyhow::Result<TrainingParams> {
        let mut params = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            None => TrainingParams::default(),
        };

        if let Some(generations) = self.generations {
            params.generations = generations;
        }
        if let Some(population_size) = self.population_size {
            params.evolver.population_size = population_size;
        }
        if let Some(mutation_rate) = self.mutation_rate {
            params.evolver.mutation_rate = mutation_rate;
        }
        if let Some(cutoff_rate) = self.cutoff_rate {
            params.evolver.cutoff_rate = cutoff_rate;
        }
        if let Some(decks) = self.decks {
            params.decks = decks;
        }
        if let Some(penetration) = self.penetration {
            params.penetration = penetration;
        }
        if let Some(hands) = self.hands {
            params.hands_per_generation = hands;
        }
        params.validate()?;
        Ok(params)
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let session = TrainingSession::new(arg.params()?, BankrollFitness)?;
    let mut rng = match arg.seed {
        Some(seed) => SeededRandomizer::with_seed(seed),
        None => SeededRandomizer::new(),
    };
    log::info!("training with seed {}: {:?}", rng.seed(), session.params());

    let EvaluatedGeneration {
        candidates, report, ..
    } = session.run(&mut rng, |_, _| {})?;

    let Some(best) = candidates.into_iter().next() else {
        eprintln!("No candidates were trained.");
        return Ok(());
    };
    let fitness = best.fitness();
    let strategy = Strategy::decode(best.into_chromosome().genes())
        .context("Best candidate did not decode into a strategy")?;

    eprintln!("Seed: {}", rng.seed());
    eprintln!("Last generation: {report}");
    eprintln!("Best fitness: {fitness:.3}");

    match &arg.output {
        Some(path) => {
            fs::write(path, format!("{strategy}\n"))
                .with_context(|| format!("Failed to write strategy file: {}", path.display()))?;
            eprintln!("Best strategy written to {}", path.display());
        }
        None => println!("{strategy}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_overrides() {
        let arg = TrainArg {
            generations: Some(7),
            population_size: Some(20),
            hands: Some(30),
            penetration: Some(0.8),
            ..TrainArg::default()
        };
        let params = arg.params().unwrap();
        assert_eq!(params.generations, 7);
        assert_eq!(params.evolver.population_size, 20);
        assert_eq!(params.hands_per_generation, 30);
        assert!((params.penetration - 0.8).abs() < f64::EPSILON);
        assert_eq!(params.decks, TrainingParams::default().decks);
    }

    #[test]
    fn test_params_from_config_file() {
        let path = std::env::temp_dir().join(format!("blackjack-train-{}.json", std::process::id()));
        fs::write(&path, r#"{"generations": 4, "decks": 2}"#).unwrap();

        let arg = TrainArg {
            config: Some(path.clone()),
            decks: Some(3),
            ..TrainArg::default()
        };
        let params = arg.params().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(params.generations, 4);
        assert_eq!(params.decks, 3);
    }

    #[test]
    fn test_missing_config_file() {
        let arg = TrainArg {
            config: Some(PathBuf::from("/nonexistent/blackjack.json")),
            ..TrainArg::default()
        };
        let err = arg.params().unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_params_reject_full_penetration() {
        let arg = TrainArg {
            penetration: Some(1.0),
            ..TrainArg::default()
        };
        let err = arg.params().unwrap_err();
        assert!(err.to_string().contains("penetration"));
    }

    #[test]
    fn test_params_reject_shoe_without_room_for_a_round() {
        let arg = TrainArg {
            decks: Some(1),
            penetration: Some(0.9),
            ..TrainArg::default()
        };
        assert!(arg.params().is_err());
    }
}
