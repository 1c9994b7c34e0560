use rand::{SeedableRng, rngs::StdRng};

use crate::generate_with;

// 2^64 / golden ratio, spreads adjacent worker indices across the seed space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// An owned random source for key suffixes. Each worker holds its own, so
/// nothing is shared between tasks.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    rng: StdRng,
}

impl KeyGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn for_worker(run_seed: u64, worker: usize) -> Self {
        let offset = (worker as u64).wrapping_add(1).wrapping_mul(SEED_STRIDE);
        Self::seeded(run_seed ^ offset)
    }

    pub fn generate(&mut self, prefix: &str, length: usize) -> String {
        generate_with(&mut self.rng, prefix, length)
    }
}
