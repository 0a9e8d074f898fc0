use std::fmt;

use blackjack_engine::PlayerStatistics;
use serde::Serialize;

/// Aggregate results of one evaluated generation.
///
/// Maxima start from zero, so a generation where everyone lost reports a max
/// bankroll of `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    pub population: usize,
    pub average_bankroll: f64,
    pub max_bankroll: f64,
    pub max_games_played: usize,
    pub max_games_won: usize,
    pub max_win_rate: f64,
    pub average_fitness: f64,
    pub max_fitness: f64,
}

impl GenerationReport {
    /// Summarises players' statistics and the fitness each one was given.
    #[expect(clippy::cast_precision_loss)]
    pub fn from_scores<'a, I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (&'a PlayerStatistics, f64)>,
    {
        let mut report = Self::default();
        let mut bankroll_sum = 0.0;
        let mut fitness_sum = 0.0;

        for (stats, fitness) in scores {
            report.population += 1;
            bankroll_sum += stats.bankroll;
            fitness_sum += fitness;

            report.max_bankroll = f64::max(report.max_bankroll, stats.bankroll);
            report.max_games_played = usize::max(report.max_games_played, stats.games_played);
            report.max_games_won = usize::max(report.max_games_won, stats.games_won);
            report.max_win_rate = f64::max(report.max_win_rate, stats.win_rate());
            report.max_fitness = f64::max(report.max_fitness, fitness);
        }

        if report.population > 0 {
            report.average_bankroll = bankroll_sum / report.population as f64;
            report.average_fitness = fitness_sum / report.population as f64;
        }
        report
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bankroll avg {:.2} max {:.2}, games played max {}, games won max {}, \
             win rate max {:.3}, fitness avg {:.2} max {:.2}",
            self.average_bankroll,
            self.max_bankroll,
            self.max_games_played,
            self.max_games_won,
            self.max_win_rate,
            self.average_fitness,
            self.max_fitness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(games_played: usize, games_won: usize, bankroll: f64) -> PlayerStatistics {
        PlayerStatistics {
            games_seen: games_played,
            games_played,
            games_won,
            bankroll,
            ..PlayerStatistics::default()
        }
    }

    #[test]
    fn test_from_scores() {
        let players = [stats(10, 5, 100.0), stats(20, 4, 300.0), stats(0, 0, 0.0)];
        let fitnesses = [1.0, 5.0, 0.0];
        let report = GenerationReport::from_scores(players.iter().zip(fitnesses));

        assert_eq!(report.population, 3);
        assert!((report.average_bankroll - 400.0 / 3.0).abs() < 1e-9);
        assert!((report.max_bankroll - 300.0).abs() < f64::EPSILON);
        assert_eq!(report.max_games_played, 20);
        assert_eq!(report.max_games_won, 5);
        assert!((report.max_win_rate - 0.5).abs() < f64::EPSILON);
        assert!((report.average_fitness - 2.0).abs() < f64::EPSILON);
        assert!((report.max_fitness - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_generation() {
        let report = GenerationReport::from_scores(std::iter::empty());
        assert_eq!(report, GenerationReport::default());
    }

    #[test]
    fn test_serialize() {
        let report = GenerationReport::from_scores([(&stats(4, 2, 10.0), 3.0)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["population"], 1);
        assert_eq!(json["max_games_won"], 2);
        assert_eq!(json["max_win_rate"], 0.5);
    }
}
