//! Seeded random selection for reproducible stochastic choices
//!
//! All random draws in the generator flow through a single [`RandomSource`]
//! stream. The order of draws is part of the determinism contract: for a
//! fixed seed the generated map is identical across runs.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector threaded through every generation phase
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a deterministic random source from an integer seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a uniform value in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Bernoulli draw: true with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random::<f64>() < p
    }

    /// Draw a uniform index in `[0, len)`
    ///
    /// Returns 0 when `len` is 0 so callers can guard on emptiness separately.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.rng.random_range(0..len)
        }
    }

    /// Generic weighted random selection
    ///
    /// Returns an index into the weights array using the cumulative
    /// distribution. Falls back to a uniform draw when no weight is positive,
    /// consuming exactly one random value either way.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return self.index(weights.len());
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        let mut last_positive = 0;
        for (i, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            last_positive = i;
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        last_positive
    }
}

#[cfg(test)]
mod tests {
    use super::RandomSource;

    #[test]
    fn same_seed_same_stream() {
        let mut a = RandomSource::new(7);
        let mut b = RandomSource::new(7);
        for _ in 0..32 {
            assert!((a.unit() - b.unit()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn weighted_choice_skips_zero_weights() {
        let mut rng = RandomSource::new(11);
        let weights = [0.0, 1.0, 0.0];
        for _ in 0..64 {
            assert_eq!(rng.weighted_choice(&weights), 1);
        }
    }

    #[test]
    fn weighted_choice_all_zero_falls_back_to_uniform() {
        let mut rng = RandomSource::new(13);
        let weights = [0.0, 0.0, 0.0];
        for _ in 0..64 {
            assert!(rng.weighted_choice(&weights) < weights.len());
        }
    }

    #[test]
    fn index_handles_empty_range() {
        let mut rng = RandomSource::new(17);
        assert_eq!(rng.index(0), 0);
    }
}
