/// Running record of a player's results at the table.
///
/// Counts rounds and games separately: `games_seen` and `games_played` count
/// rounds (dealt, and dealt with a bet on the table), while `games_won`,
/// `games_lost` and `games_pushed` count individual games, so a round with a
/// split can add two results.
///
/// # Example
///
/// ```
/// use blackjack_engine::PlayerStatistics;
///
/// let stats = PlayerStatistics {
///     games_played: 4,
///     games_won: 3,
///     ..PlayerStatistics::default()
/// };
/// assert_eq!(stats.win_rate(), 0.75);
/// assert_eq!(PlayerStatistics::default().win_rate(), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStatistics {
    pub games_seen: usize,
    pub games_played: usize,
    pub games_won: usize,
    pub games_lost: usize,
    pub games_pushed: usize,
    pub initial_bankroll: f64,
    pub bankroll: f64,
    pub bankroll_delta: f64,
    /// Encoded strategy the player followed, for re-breeding.
    pub strategy: Vec<u8>,
}

impl PlayerStatistics {
    /// Returns `games_won / games_played`, or `0.0` before any game was played.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.games_won as f64 / self.games_played as f64
    }

    /// Returns the number of rounds the player sat out.
    #[must_use]
    pub fn games_skipped(&self) -> usize {
        self.games_seen.saturating_sub(self.games_played)
    }
}
