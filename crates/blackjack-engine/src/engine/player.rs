use crate::{
    CursorOutOfBoundsError,
    core::{Card, Hand, Shoe},
};

use super::{
    game::{Game, Outcome},
    statistics::PlayerStatistics,
    strategy::{Action, Strategy},
    table::TablePlayer,
};

/// A seat at the table that plays by a decoded [`Strategy`].
///
/// # Decision state machine
///
/// Each of the player's games is played to completion before the next one starts.
/// On every step the first matching rule decides:
///
/// 1. fewer than two cards (after a split): hit;
/// 2. doubled and holding its extra card: stand;
/// 3. the dealer holds a natural with a non-ace hole card: stand;
/// 4. otherwise follow the strategy, except that a double or split the bankroll
///    cannot cover, or a split of anything but a two-card pair, becomes a hit.
///
/// Cards are read from the shoe at increasing offsets past the cursor; the table
/// advances the real cursor once every player has finished.
#[derive(Debug, Clone)]
pub struct Player {
    strategy: Strategy,
    initial_bankroll: f64,
    bankroll: f64,
    games: Vec<Game>,
    games_seen: usize,
    games_played: usize,
    games_won: usize,
    games_lost: usize,
    games_pushed: usize,
}

impl Player {
    /// Seats a player with the strategy's initial bankroll.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        let bankroll = f64::from(strategy.initial_bankroll());
        Self::with_bankroll(strategy, bankroll)
    }

    /// Seats a player with an explicit starting bankroll.
    #[must_use]
    pub fn with_bankroll(strategy: Strategy, bankroll: f64) -> Self {
        Self {
            strategy,
            initial_bankroll: bankroll,
            bankroll,
            games: Vec::new(),
            games_seen: 0,
            games_played: 0,
            games_won: 0,
            games_lost: 0,
            games_pushed: 0,
        }
    }

    #[must_use]
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    #[must_use]
    pub fn bankroll(&self) -> f64 {
        self.bankroll
    }

    /// Returns the games currently on the table.
    #[must_use]
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    fn can_cover(&self, bet: u32) -> bool {
        self.bankroll >= f64::from(bet)
    }

    fn next_action(&self, game: &Game, dealer_hand: &Hand) -> Action {
        let hand = game.hand();
        if hand.len() < 2 {
            return Action::Hit;
        }
        if game.is_doubled() && hand.len() > 2 {
            return Action::Stand;
        }
        if dealer_shows_blackjack(dealer_hand) {
            return Action::Stand;
        }

        let ideal = self.strategy.play(hand, dealer_hand);
        if ideal.is_split() && !(hand.len() == 2 && hand.is_pair()) {
            return Action::Hit;
        }
        if ideal.raises_stake() && !self.can_cover(game.bet()) {
            return Action::Hit;
        }
        ideal
    }

    fn play_game(
        &mut self,
        index: usize,
        dealer_hand: &Hand,
        shoe: &Shoe,
        used: &mut usize,
    ) -> Result<(), CursorOutOfBoundsError> {
        loop {
            match self.next_action(&self.games[index], dealer_hand) {
                Action::Stand => return Ok(()),
                Action::Hit => {
                    let card = next_card(shoe, used)?;
                    self.games[index].hit(card);
                }
                Action::Double => {
                    self.bankroll -= f64::from(self.games[index].bet());
                    let card = next_card(shoe, used)?;
                    self.games[index].double(card);
                }
                Action::Split => {
                    self.bankroll -= f64::from(self.games[index].bet());
                    let split = self.games[index].split();
                    self.games.push(split);
                }
            }
        }
    }
}

impl TablePlayer for Player {
    fn bet(&mut self) -> Option<u32> {
        self.games_seen += 1;
        let bet = self.strategy.bet();
        if !self.can_cover(bet) {
            return None;
        }

        self.bankroll -= f64::from(bet);
        self.games_played += 1;
        self.games.push(Game::new(bet));
        Some(bet)
    }

    fn play(&mut self, hand: &Hand, dealer_hand: &Hand, shoe: &Shoe) -> Result<usize, CursorOutOfBoundsError> {
        let Some(first) = self.games.first_mut() else {
            return Ok(0);
        };
        first.set_hand(hand.clone());

        let mut used = 0;
        let mut index = 0;
        // splits append to the list while it is being walked
        while index < self.games.len() {
            self.play_game(index, dealer_hand, shoe, &mut used)?;
            index += 1;
        }
        Ok(used)
    }

    fn resolve(&mut self, dealer_hand: &Hand) {
        for game in self.games.drain(..) {
            let outcome = game.outcome(dealer_hand);
            match outcome {
                Outcome::Win => self.games_won += 1,
                Outcome::Push => self.games_pushed += 1,
                Outcome::Loss => self.games_lost += 1,
            }
            self.bankroll += outcome.payout(game.bet());
        }
    }

    fn statistics(&self) -> PlayerStatistics {
        PlayerStatistics {
            games_seen: self.games_seen,
            games_played: self.games_played,
            games_won: self.games_won,
            games_lost: self.games_lost,
            games_pushed: self.games_pushed,
            initial_bankroll: self.initial_bankroll,
            bankroll: self.bankroll,
            bankroll_delta: self.bankroll - self.initial_bankroll,
            strategy: self.strategy.encoded().to_vec(),
        }
    }

    fn bankroll(&self) -> f64 {
        self.bankroll
    }
}

/// Returns `true` when the dealer's two cards make 21 and the hole card is not an ace.
///
/// Naturals with the ace in the hole are not peeked at.
fn dealer_shows_blackjack(dealer_hand: &Hand) -> bool {
    dealer_hand.is_blackjack() && !dealer_hand.hole_card().is_some_and(|card| card.rank().is_ace())
}

fn next_card(shoe: &Shoe, used: &mut usize) -> Result<Card, CursorOutOfBoundsError> {
    let card = shoe.peek_at(*used).ok_or(CursorOutOfBoundsError {
        cursor: shoe.cursor(),
        offset: *used + 1,
        size: shoe.size(),
    })?;
    *used += 1;
    Ok(card)
}
