use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use blackjack_engine::{Player, PlayerStatistics, Shoe, Strategy, Table, TablePlayer as _};
use blackjack_random::{RandomSeed, SeededRandomizer};
use blackjack_training::{BankrollFitness, FitnessFunction as _};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Strategy file: 348 symbols, whitespace ignored
    #[arg(long)]
    strategy: PathBuf,
    #[arg(long, default_value_t = 1000)]
    hands: usize,
    #[arg(long, default_value_t = 6)]
    decks: usize,
    #[arg(long, default_value_t = 0.5)]
    penetration: f64,
    /// 32 hex digit seed; random if omitted
    #[arg(long)]
    seed: Option<RandomSeed>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        strategy,
        hands,
        decks,
        penetration,
        seed,
    } = arg;

    let shoe = Shoe::with_penetration(*decks, *penetration)?;
    let strategy = load_strategy(strategy)?;
    let mut rng = match seed {
        Some(seed) => SeededRandomizer::with_seed(*seed),
        None => SeededRandomizer::new(),
    };

    let mut table = Table::new(vec![Box::new(Player::new(strategy))], shoe);
    let rounds = table.run_many(*hands, &mut rng)?;

    let stats = table.players()[0].statistics();
    eprintln!("Seed: {}", rng.seed());
    eprintln!("Rounds dealt: {rounds}");
    print_statistics(&stats);
    Ok(())
}

fn load_strategy(path: &Path) -> anyhow::Result<Strategy> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read strategy file: {}", path.display()))?;
    text.parse::<Strategy>()
        .with_context(|| format!("Failed to decode strategy file: {}", path.display()))
}

fn print_statistics(stats: &PlayerStatistics) {
    eprintln!("Games seen:    {}", stats.games_seen);
    eprintln!("Games played:  {}", stats.games_played);
    eprintln!(
        "Won/lost/push: {}/{}/{}",
        stats.games_won, stats.games_lost, stats.games_pushed
    );
    eprintln!("Win rate:      {:.3}", stats.win_rate());
    eprintln!(
        "Bankroll:      {:.2} ({:+.2})",
        stats.bankroll, stats.bankroll_delta
    );
    eprintln!("Fitness:       {:.3}", BankrollFitness.fitness(stats));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_strategy() {
        let path = std::env::temp_dir().join(format!("blackjack-sim-{}.strategy", std::process::id()));
        fs::write(&path, include_str!("../../../blackjack-engine/fixtures/basic.strategy")).unwrap();
        let strategy = load_strategy(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(strategy.bet(), 1);
    }

    #[test]
    fn test_load_invalid_strategy() {
        let path = std::env::temp_dir().join(format!("blackjack-bad-{}.strategy", std::process::id()));
        fs::write(&path, "HHHH").unwrap();
        let err = load_strategy(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("Failed to decode strategy file"));
    }

    #[test]
    fn test_rejects_out_of_range_penetration() {
        let arg = SimulateArg {
            strategy: PathBuf::from("unused.strategy"),
            hands: 10,
            decks: 6,
            penetration: 1.0,
            seed: None,
        };
        let err = run(&arg).unwrap_err();
        assert!(err.to_string().contains("penetration"));
    }
}
