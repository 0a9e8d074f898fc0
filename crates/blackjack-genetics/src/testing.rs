use std::collections::VecDeque;

use blackjack_random::Randomizer;

/// A [`Randomizer`] that replays scripted answers and records what it was asked.
///
/// Once a script runs dry the matching fallback is used: `fallback_event` for
/// events, the first symbol of the alphabet for picks, and `min` for numbers.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRandomizer {
    pub events: VecDeque<bool>,
    pub fallback_event: bool,
    pub picks: VecDeque<u8>,
    pub numbers: VecDeque<usize>,
    pub asked_probabilities: Vec<f64>,
    pub pick_count: usize,
}

impl ScriptedRandomizer {
    pub fn with_events(events: impl IntoIterator<Item = bool>, fallback_event: bool) -> Self {
        Self {
            events: events.into_iter().collect(),
            fallback_event,
            ..Self::default()
        }
    }
}

impl Randomizer for ScriptedRandomizer {
    fn event_did_happen(&mut self, probability: f64) -> bool {
        self.asked_probabilities.push(probability);
        self.events.pop_front().unwrap_or(self.fallback_event)
    }

    fn pick_one(&mut self, alphabet: &[u8]) -> u8 {
        self.pick_count += 1;
        self.picks.pop_front().unwrap_or(alphabet[0])
    }

    fn number_between(&mut self, min: usize, _max: usize) -> usize {
        self.numbers.pop_front().unwrap_or(min)
    }
}
