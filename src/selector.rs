use rand::{SeedableRng, seq::SliceRandom};
use rand_pcg::Pcg32;

use crate::error::MenuError::{self, EmptyMenu};

/// Draws dishes from the menu without replacement.
pub struct RandomSelector {
    rng: Pcg32,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Fixed seed for reproducible draws.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Draws `count` distinct dishes in random order. Requests below 1 are
    /// raised to 1; requests above the menu size are capped to it.
    pub fn select(&mut self, menu: &[String], count: i64) -> Result<Vec<String>, MenuError> {
        if menu.is_empty() {
            return Err(EmptyMenu);
        }

        let count = (count.max(1) as usize).min(menu.len());

        let mut pool = menu.to_vec();
        let (picked, _) = pool.partial_shuffle(&mut self.rng, count);

        Ok(picked.to_vec())
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}
