use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of uniform indices for word draws, free reveals and hint letters.
pub trait RandomSource: Send {
    /// Returns an index in `0..upper`. `upper` is always greater than zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

pub struct ThreadRandom {
    rng: StdRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Replays a fixed sequence of indices, each taken modulo `upper`.
///
/// Once the script runs out it hands out a rotating counter, so callers that
/// redraw until they hit an acceptable index always make progress.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: VecDeque<usize>,
    counter: usize,
}

impl ScriptedRandom {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            counter: 0,
        }
    }

}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        match self.script.pop_front() {
            Some(value) => value % upper,
            None => {
                let value = self.counter % upper;
                self.counter = self.counter.wrapping_add(1);
                value
            }
        }
    }
}
