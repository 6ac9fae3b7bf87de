use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Identifier, Source};

/// Symbols drawn for random identifiers.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_LENGTH: usize = 7;

/// Endless random identifiers.
///
/// Every position is drawn independently and uniformly from [`ALPHABET`].
/// Nothing is remembered between draws, so repeats can happen.
#[derive(Debug, Clone)]
pub struct RandomSource<R = StdRng> {
    rng:    R,
    length: usize,
}

impl RandomSource<StdRng> {
    pub fn new() -> Self { Self::with_rng(StdRng::from_entropy()) }
}

impl Default for RandomSource<StdRng> {
    fn default() -> Self { Self::new() }
}

impl<R: Rng> RandomSource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            length: DEFAULT_LENGTH,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn length(&self) -> usize { self.length }

    fn generate(&mut self) -> Identifier {
        (0..self.length)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl<R: Rng> Source for RandomSource<R> {
    fn has_more(&mut self) -> bool { true }

    fn take_next(&mut self) -> Option<Identifier> { Some(self.generate()) }

    fn release(&mut self) {}
}
