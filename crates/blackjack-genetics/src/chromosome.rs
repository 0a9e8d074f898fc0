//! Byte-string chromosomes and their genetic operators.
//!
//! # Operations
//!
//! - **Initialization**: [`Chromosome::random`] draws every locus from its alphabet
//! - **Crossover**: [`Chromosome::merge`] picks each locus from either parent with
//!   equal probability, then mutates the child
//! - **Mutation**: [`Chromosome::mutate`] redraws each locus with probability
//!   `mutation_rate`
//!
//! None of the operators change the length, and every gene they write comes from
//! the alphabet of its locus.

use std::sync::Arc;

use blackjack_random::Randomizer;

/// The legal symbols of each locus, shared by every chromosome of a population.
pub type Alphabets = Arc<[&'static [u8]]>;

/// Probability of taking a locus from `self` during [`Chromosome::merge`].
const CROSSOVER_BIAS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    genes: Vec<u8>,
    alphabets: Alphabets,
}

impl Chromosome {
    /// Wraps existing genes.
    ///
    /// # Panics
    ///
    /// Panics if `genes` and `alphabets` differ in length.
    #[must_use]
    pub fn new(genes: Vec<u8>, alphabets: Alphabets) -> Self {
        assert_eq!(
            genes.len(),
            alphabets.len(),
            "chromosome length must match its alphabet sequence"
        );
        Self { genes, alphabets }
    }

    /// Draws every locus uniformly from its alphabet.
    pub fn random<R>(alphabets: Alphabets, rng: &mut R) -> Self
    where
        R: Randomizer + ?Sized,
    {
        let genes = alphabets
            .iter()
            .map(|alphabet| rng.pick_one(alphabet))
            .collect();
        Self { genes, alphabets }
    }

    #[must_use]
    pub fn genes(&self) -> &[u8] {
        &self.genes
    }

    #[must_use]
    pub fn alphabets(&self) -> &Alphabets {
        &self.alphabets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Uniform crossover with `other`, followed by [`Self::mutate`] on the child.
    ///
    /// # Panics
    ///
    /// Panics if the parents differ in length.
    #[must_use]
    pub fn merge<R>(&self, other: &Self, mutation_rate: f64, rng: &mut R) -> Self
    where
        R: Randomizer + ?Sized,
    {
        assert_eq!(self.len(), other.len(), "cannot merge chromosomes of different lengths");
        let genes = self
            .genes
            .iter()
            .zip(&other.genes)
            .map(|(mine, theirs)| {
                if rng.event_did_happen(CROSSOVER_BIAS) {
                    *mine
                } else {
                    *theirs
                }
            })
            .collect();

        let mut child = Self {
            genes,
            alphabets: Arc::clone(&self.alphabets),
        };
        child.mutate(mutation_rate, rng);
        child
    }

    /// Redraws each locus from its alphabet with probability `mutation_rate`.
    pub fn mutate<R>(&mut self, mutation_rate: f64, rng: &mut R)
    where
        R: Randomizer + ?Sized,
    {
        for (gene, alphabet) in self.genes.iter_mut().zip(self.alphabets.iter()) {
            if rng.event_did_happen(mutation_rate) {
                *gene = rng.pick_one(alphabet);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blackjack_random::SeededRandomizer;

    use super::*;
    use crate::testing::ScriptedRandomizer;

    const MUTATION_RATE: f64 = 0.1;

    fn seeded() -> SeededRandomizer {
        SeededRandomizer::with_seed("c0ffee00000000000000000000000001".parse().unwrap())
    }

    fn alphabets() -> Alphabets {
        Arc::from(vec![&b"ABC"[..]; 5])
    }

    fn chromosome(genes: &str) -> Chromosome {
        Chromosome::new(genes.as_bytes().to_vec(), alphabets())
    }

    #[test]
    fn test_new_keeps_genes() {
        assert_eq!(chromosome("AAAAA").genes(), b"AAAAA");
        assert_eq!(chromosome("AAAAA").len(), 5);
    }

    #[test]
    #[should_panic(expected = "must match its alphabet")]
    fn test_new_rejects_length_mismatch() {
        let _ = Chromosome::new(b"AAAA".to_vec(), alphabets());
    }

    #[test]
    fn test_random() {
        let mut rng = ScriptedRandomizer::default();
        rng.picks.extend(*b"CCCCC");
        let random = Chromosome::random(alphabets(), &mut rng);
        assert_eq!(random.genes(), b"CCCCC");
    }

    #[test]
    fn test_random_respects_each_locus() {
        let alphabets: Alphabets = Arc::from(vec![&b"HSDP"[..], &b"0123456789ABCDEF"[..], &b"X"[..]]);
        let mut rng = seeded();
        for _ in 0..100 {
            let random = Chromosome::random(Arc::clone(&alphabets), &mut rng);
            for (gene, alphabet) in random.genes().iter().zip(alphabets.iter()) {
                assert!(alphabet.contains(gene));
            }
        }
    }

    #[test]
    fn test_merge_alternating_parents() {
        let mut rng =
            ScriptedRandomizer::with_events([true, false, true, false, true], false);
        let merged = chromosome("AAAAA").merge(&chromosome("BBBBB"), MUTATION_RATE, &mut rng);
        assert_eq!(merged.genes(), b"ABABA");

        // five crossover draws, then five mutation draws
        assert_eq!(rng.asked_probabilities[..5], [0.5; 5]);
        assert_eq!(rng.asked_probabilities[5..], [MUTATION_RATE; 5]);
        assert_eq!(rng.pick_count, 0);
    }

    #[test]
    fn test_merge_mutates_offspring() {
        // take all of self, then mutate only the first locus
        let mut rng = ScriptedRandomizer::with_events([true, true, true, true, true, true], false);
        rng.picks.push_back(b'C');
        let merged = chromosome("AAAAA").merge(&chromosome("BBBBB"), MUTATION_RATE, &mut rng);
        assert_eq!(merged.genes(), b"CAAAA");
    }

    #[test]
    fn test_merge_takes_genes_from_either_parent() {
        let a = chromosome("AAAAA");
        let b = chromosome("BBBBB");
        let mut rng = seeded();
        for _ in 0..50 {
            let merged = a.merge(&b, 0.0, &mut rng);
            assert_eq!(merged.len(), a.len());
            assert!(merged.genes().iter().all(|g| *g == b'A' || *g == b'B'));
        }
    }

    #[test]
    fn test_mutate_rate_zero_is_identity() {
        let mut rng = seeded();
        let mut subject = chromosome("ABCAB");
        subject.mutate(0.0, &mut rng);
        assert_eq!(subject.genes(), b"ABCAB");
    }

    #[test]
    fn test_mutate_rate_one_redraws_every_locus() {
        let mut rng = ScriptedRandomizer::with_events([], true);
        rng.picks.extend(*b"CBACB");
        let mut subject = chromosome("AAAAA");
        subject.mutate(1.0, &mut rng);
        assert_eq!(rng.pick_count, 5);
        assert_eq!(subject.genes(), b"CBACB");

        let mut rng = seeded();
        subject.mutate(1.0, &mut rng);
        assert!(subject.genes().iter().all(|g| b"ABC".contains(g)));
    }
}
