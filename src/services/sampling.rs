//! Random draws over index-addressable pools.
//!
//! All draws take the RNG explicitly so a seeded `StdRng` makes selection
//! reproducible.

use rand::Rng;
use std::collections::HashSet;
use std::hash::Hash;

/// Pool was smaller than the number of draws requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted {
    pub requested: usize,
    pub available: usize,
}

/// Draws `count` elements without replacement. Each draw picks a uniformly
/// random live index, then swaps it out of the live region, so an index is
/// never drawn twice.
pub fn sample_without_replacement<T, R: Rng + ?Sized>(
    mut pool: Vec<T>,
    count: usize,
    rng: &mut R,
) -> Result<Vec<T>, Exhausted> {
    if count > pool.len() {
        return Err(Exhausted {
            requested: count,
            available: pool.len(),
        });
    }

    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        let idx = rng.gen_range(0..pool.len());
        chosen.push(pool.swap_remove(idx));
    }

    Ok(chosen)
}

/// Draws `count` elements uniformly with replacement. Empty pool yields nothing.
pub fn sample_with_replacement<T: Clone, R: Rng + ?Sized>(
    pool: &[T],
    count: usize,
    rng: &mut R,
) -> Vec<T> {
    if pool.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|_| pool[rng.gen_range(0..pool.len())].clone())
        .collect()
}

/// Removes repeated items, keeping the first occurrence of each.
pub fn dedup_preserving_order<T: Clone + Eq + Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
