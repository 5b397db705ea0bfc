//! Uniform random selection.
//!
//! Random spells, random items and theft all pick one element out of a
//! collection. The pick is delegated to a [`Chooser`] so callers decide where
//! the randomness comes from: an entropy-seeded RNG in play, a seeded one for
//! reproducible simulations, or a fixed script in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index uniformly from `0..len`.
pub trait Chooser {
    /// Choose an index in `0..len`. Never called with `len == 0`.
    fn choose(&mut self, len: usize) -> usize;
}

/// A [`Chooser`] backed by any `rand` RNG.
#[derive(Debug, Clone)]
pub struct RngChooser<R> {
    rng: R,
}

impl<R: Rng> RngChooser<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngChooser<StdRng> {
    /// Deterministic chooser; the same seed yields the same picks.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Chooser for RngChooser<R> {
    fn choose(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Pick an element of `items`, or `None` if it is empty.
pub fn choose_from<'a, T, C>(items: &'a [T], chooser: &mut C) -> Option<&'a T>
where
    C: Chooser + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    items.get(chooser.choose(items.len()))
}
