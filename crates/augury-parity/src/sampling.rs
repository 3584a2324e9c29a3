//! Seeded sampling. Same seed and shape always yield the same rows.

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Up to `samples` distinct rows drawn uniformly from `0..rows`.
pub fn sample_pool(rows: usize, samples: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    index::sample(&mut rng, rows, samples.min(rows)).into_vec()
}

/// `count` rows drawn uniformly with replacement from `pool`.
pub fn bench_queries(pool: &[usize], count: usize, seed: u64) -> Vec<usize> {
    if pool.is_empty() {
        return Vec::new();
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| pool[rng.random_range(0..pool.len())])
        .collect()
}
