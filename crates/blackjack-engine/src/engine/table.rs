use blackjack_random::Randomizer;

use crate::{
    CursorOutOfBoundsError,
    core::{Hand, Shoe},
};

use super::statistics::PlayerStatistics;

/// Dealer stands on any total of at least this much.
pub const DEALER_STAND_TOTAL: u32 = 17;

/// The capability a table needs from each seat.
pub trait TablePlayer {
    /// Places this round's bet, or returns `None` to sit the round out.
    fn bet(&mut self) -> Option<u32>;

    /// Plays every game the player has on the table and returns how many cards
    /// it took from the shoe.
    ///
    /// Cards are read with [`Shoe::peek_at`]; the table advances the cursor.
    /// Fails when the shoe has no card left for a draw the player needs.
    fn play(&mut self, hand: &Hand, dealer_hand: &Hand, shoe: &Shoe) -> Result<usize, CursorOutOfBoundsError>;

    /// Settles every game against the dealer's final hand.
    fn resolve(&mut self, dealer_hand: &Hand);

    fn statistics(&self) -> PlayerStatistics;

    fn bankroll(&self) -> f64 {
        self.statistics().bankroll
    }
}

/// Deals rounds from a single shoe to a set of players.
///
/// Every player receives the same two cards each round, so strategies seated
/// together are compared on identical deals.
pub struct Table {
    players: Vec<Box<dyn TablePlayer>>,
    shoe: Shoe,
}

impl Table {
    #[must_use]
    pub fn new(players: Vec<Box<dyn TablePlayer>>, shoe: Shoe) -> Self {
        Self { players, shoe }
    }

    #[must_use]
    pub fn players(&self) -> &[Box<dyn TablePlayer>] {
        &self.players
    }

    #[must_use]
    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Plays one full round: bets, deal, players, dealer, settlement.
    pub fn run<R>(&mut self, rng: &mut R) -> Result<(), CursorOutOfBoundsError>
    where
        R: Randomizer + ?Sized,
    {
        let seated = self
            .players
            .iter_mut()
            .filter_map(|player| player.bet())
            .count();

        let (hand, dealer_hand) = self.deal_hands(rng)?;
        self.play_all_games(&hand, &dealer_hand)?;
        let dealer_hand = self.play_dealer_hand(dealer_hand)?;
        log::trace!(
            "round: {seated}/{} players bet, player {hand}, dealer {dealer_hand}",
            self.players.len()
        );

        for player in &mut self.players {
            player.resolve(&dealer_hand);
        }
        Ok(())
    }

    /// Plays up to `rounds` rounds and returns how many were dealt.
    ///
    /// Stops early once the players' combined bankroll is gone.
    pub fn run_many<R>(&mut self, rounds: usize, rng: &mut R) -> Result<usize, CursorOutOfBoundsError>
    where
        R: Randomizer + ?Sized,
    {
        for dealt in 0..rounds {
            let table_bankroll = self.players.iter().map(|p| p.bankroll()).sum::<f64>();
            if table_bankroll <= 0.0 {
                log::debug!("table bankroll exhausted after {dealt} rounds");
                return Ok(dealt);
            }
            self.run(rng)?;
        }
        Ok(rounds)
    }

    fn deal_hands<R>(&mut self, rng: &mut R) -> Result<(Hand, Hand), CursorOutOfBoundsError>
    where
        R: Randomizer + ?Sized,
    {
        if self.shoe.needs_reshuffle() {
            log::debug!(
                "reshuffling shoe of {} cards at cursor {}",
                self.shoe.size(),
                self.shoe.cursor()
            );
            self.shoe.shuffle(rng);
        }

        let top = self.shoe.peek(4).to_vec();
        self.shoe.advance_cursor(4)?;
        let &[first, second, third, fourth] = top.as_slice() else {
            unreachable!("advancing by four guarantees four cards were peeked");
        };

        let hand = Hand::from([first, third]);
        let dealer_hand = Hand::from([second, fourth.concealed()]);
        Ok((hand, dealer_hand))
    }

    fn play_all_games(&mut self, hand: &Hand, dealer_hand: &Hand) -> Result<(), CursorOutOfBoundsError> {
        let shoe = &self.shoe;
        let mut used = 0;
        for player in &mut self.players {
            used = usize::max(used, player.play(hand, dealer_hand, shoe)?);
        }
        self.shoe.advance_cursor(used)?;
        Ok(())
    }

    fn play_dealer_hand(&mut self, mut dealer_hand: Hand) -> Result<Hand, CursorOutOfBoundsError> {
        dealer_hand.reveal();
        loop {
            let score = dealer_hand.score();
            if score.busted || score.high >= DEALER_STAND_TOTAL {
                return Ok(dealer_hand);
            }
            dealer_hand.deal(self.shoe.draw()?);
        }
    }
}
