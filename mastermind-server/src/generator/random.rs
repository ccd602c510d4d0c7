//! Selection helpers over an injected random source.
//!
//! None of these touch a global generator; pass `rand::rng()` in production
//! and a seeded `StdRng` in tests.

use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform integer in `[min, max]`
pub fn rand_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.random_range(min..=max)
}

/// Uniform pick, `None` for an empty slice
pub fn sample<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.random_range(0..items.len())])
}

/// Uniformly shuffled view of `items`
pub fn shuffle<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Vec<&'a T> {
    let mut view: Vec<&T> = items.iter().collect();
    view.shuffle(rng);
    view
}

/// Up to `count` distinct elements drawn without replacement, in draw order
pub fn sample_many_unique<'a, T, R: Rng + ?Sized>(
    items: &'a [T],
    count: usize,
    rng: &mut R,
) -> Vec<&'a T> {
    let mut remaining: Vec<&T> = items.iter().collect();
    let mut picked = Vec::with_capacity(count.min(remaining.len()));
    while !remaining.is_empty() && picked.len() < count {
        let idx = rng.random_range(0..remaining.len());
        picked.push(remaining.remove(idx));
    }
    picked
}
