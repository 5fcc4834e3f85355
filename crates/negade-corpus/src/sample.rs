//! Reproducible sampling of records for template generation.

use oorandom::Rand32;

/// Pick `count` distinct indices out of `population` with a seeded RNG.
///
/// Fisher-Yates prefix shuffle: only the first `count` positions are
/// settled, so the cost is O(population) memory and O(count) swaps.
/// `count` is clamped to the population size.
pub fn sample_indices(count: usize, population: usize, seed: u64) -> Vec<usize> {
    let count = count.min(population);
    let mut rng = Rand32::new(seed);

    let mut indices: Vec<usize> = (0..population).collect();
    for i in 0..count {
        let j = i + rng.rand_range(0..(population - i) as u32) as usize;
        indices.swap(i, j);
    }
    indices.truncate(count);
    indices
}
