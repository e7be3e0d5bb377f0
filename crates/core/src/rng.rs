//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece kind in shuffled order and is consumed
//! before a new one is shuffled, so no kind repeats until all seven have
//! appeared. Shuffling uses `rand`'s Fisher-Yates, which gives every one of the
//! 7! orders equal probability.
//!
//! Bags are seeded so a given seed always replays the same sequence.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::{PieceKind, PIECE_KIND_COUNT};

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct RandomBag {
    /// Current bag of pieces
    bag: [PieceKind; PIECE_KIND_COUNT],
    /// Index of the next piece to hand out; `PIECE_KIND_COUNT` means empty
    bag_index: usize,
    seed: u64,
    rng: StdRng,
}

impl RandomBag {
    /// Create an empty bag; the first draw shuffles
    pub fn new(seed: u64) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: PIECE_KIND_COUNT,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.bag_index = 0;
    }

    /// Draw the next piece, shuffling a fresh bag first when empty
    pub fn next(&mut self) -> PieceKind {
        if self.bag_index >= PIECE_KIND_COUNT {
            self.refill();
        }
        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }

    /// Pieces left in the current bag, in draw order
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }

    /// Throw away the rest of the current bag.
    ///
    /// The random stream continues, so the next draw shuffles a new bag rather
    /// than replaying the first one.
    pub fn discard(&mut self) {
        self.bag_index = PIECE_KIND_COUNT;
    }

    /// Seed this bag was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
