//! Randomized speaking order
//!
//! Fisher-Yates over a copy of the roster, driven by an injectable
//! [`RandomSource`] so tests can pin exact permutations.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::domain::Roster;

/// Source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapter from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    /// Non-deterministic source backed by the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible source: the same seed yields the same order.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceSource {
    /// An empty list behaves like a source that always returns `0.0`.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}

/// Return a uniformly random permutation of `roster`; the input is untouched.
///
/// Walks `i` from `n` down to 1, picks `j = floor(r * i)` and swaps
/// positions `i - 1` and `j`. One random draw per element.
pub fn shuffle(roster: &Roster, rng: &mut dyn RandomSource) -> Roster {
    let mut names = roster.to_vec();
    let mut current = names.len();

    while current != 0 {
        let pick = pick_index(rng.next_unit(), current);
        current -= 1;
        names.swap(current, pick);
    }

    Roster::new(names)
}

// Clamp into [0, bound): a misbehaving source must not index out of range.
fn pick_index(unit: f64, bound: usize) -> usize {
    let scaled = (unit * bound as f64).floor();
    if scaled.is_nan() || scaled < 0.0 {
        0
    } else {
        (scaled as usize).min(bound - 1)
    }
}
