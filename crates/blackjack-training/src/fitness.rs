//! Fitness functions over a player's table statistics.

use std::fmt;

use blackjack_engine::PlayerStatistics;

/// Scores how well a player did. Higher is better.
pub trait FitnessFunction: fmt::Debug {
    fn fitness(&self, stats: &PlayerStatistics) -> f64;
}

/// Rewards banking profit quickly, or failing that, going broke slowly.
///
/// - **Solvent** (bankroll > 0): the square of the bankroll delta, plus one point
///   per round sat out.
/// - **Broke**: one point per game played before ruin.
///
/// Both add `100 × win rate`. The square drops the delta's sign, so a solvent
/// player who lost money scores like one who won the same amount.
#[derive(Debug, Default, Clone, Copy)]
pub struct BankrollFitness;

const WIN_RATE_WEIGHT: f64 = 100.0;

impl FitnessFunction for BankrollFitness {
    #[expect(clippy::cast_precision_loss)]
    fn fitness(&self, stats: &PlayerStatistics) -> f64 {
        let win_bonus = WIN_RATE_WEIGHT * stats.win_rate();
        if stats.bankroll > 0.0 {
            stats.bankroll_delta.powi(2) + stats.games_skipped() as f64 + win_bonus
        } else {
            stats.games_played as f64 + win_bonus
        }
    }
}
