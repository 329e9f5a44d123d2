use arrayvec::ArrayVec;
use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

use crate::PieceKind;

/// 7-bag piece randomizer.
///
/// Deals every kind exactly once per bag, in a uniformly shuffled order, and
/// reshuffles a fresh bag when the current one runs out.
#[derive(Debug, Clone)]
pub struct Bag {
    rng: Pcg64Mcg,
    bag: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Creates a bag seeded from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(Pcg64Mcg::from_os_rng())
    }

    /// Creates a bag whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Pcg64Mcg::seed_from_u64(seed))
    }

    fn from_rng(rng: Pcg64Mcg) -> Self {
        Self {
            rng,
            bag: ArrayVec::new(),
        }
    }

    /// Number of kinds left before the next reshuffle.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    /// Deals the next kind, reshuffling a full bag first if the current one is empty.
    pub fn next_piece(&mut self) -> PieceKind {
        if let Some(kind) = self.bag.pop() {
            return kind;
        }
        let mut kinds = PieceKind::ALL;
        kinds.shuffle(&mut self.rng);
        let [rest @ .., last] = kinds;
        self.bag.extend(rest);
        last
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_bag_contains_all_pieces() {
        let mut bag = Bag::new();
        let pieces: HashSet<_> = (0..PieceKind::LEN).map(|_| bag.next_piece()).collect();
        assert_eq!(pieces.len(), PieceKind::LEN);
    }

    #[test]
    fn test_every_bag_is_a_permutation() {
        let mut bag = Bag::with_seed(7);
        for _ in 0..20 {
            let mut pieces: Vec<_> = (0..PieceKind::LEN).map(|_| bag.next_piece()).collect();
            pieces.sort_by_key(|kind| kind.as_char());
            let mut all = PieceKind::ALL.to_vec();
            all.sort_by_key(|kind| kind.as_char());
            assert_eq!(pieces, all);
        }
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut bag = Bag::with_seed(1);
        assert_eq!(bag.remaining(), 0);
        bag.next_piece();
        assert_eq!(bag.remaining(), 6);
        for _ in 0..6 {
            bag.next_piece();
        }
        assert_eq!(bag.remaining(), 0);
        bag.next_piece();
        assert_eq!(bag.remaining(), 6);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Bag::with_seed(42);
        let mut b = Bag::with_seed(42);
        let seq_a: Vec<_> = (0..50).map(|_| a.next_piece()).collect();
        let seq_b: Vec<_> = (0..50).map(|_| b.next_piece()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_many_pieces() {
        let mut bag = Bag::new();
        for _ in 0..1000 {
            let _ = bag.next_piece();
        }
    }
}
