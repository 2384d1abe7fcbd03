use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::application::ports::random::RandomSource;

/// Draws from the thread-local generator. Holds no state of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn int_in(&self, range: RangeInclusive<i32>) -> i32 {
        rand::thread_rng().gen_range(range)
    }
}

/// Reproducible draws: two sources with the same seed yield the same sequence.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_in(&self, range: RangeInclusive<i32>) -> i32 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(range)
    }
}
