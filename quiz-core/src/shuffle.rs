//! Fisher-Yates shuffling.

use rand::Rng;

/// Returns a uniformly shuffled copy of `items`. The input is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_in_place(&mut out, rng);
    out
}

/// Shuffles `items` in place.
///
/// Walks `i` from the last index down to 1, swapping `items[i]` with a
/// uniformly drawn `items[j]`, `j` in `0..=i`.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
