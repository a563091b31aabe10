//! Fisher-Yates shuffling of index ranges.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Largest `len` a client may ask [`shuffled_indices`] for. The result is
/// allocated up front, so requests beyond this are rejected by callers.
pub const MAX_SHUFFLE_LEN: usize = 4096;

/// Return a permutation of `0..len` determined entirely by `seed`.
///
/// Classic backward Fisher-Yates: for each position `i` from the end down to
/// 1, swap it with a uniformly chosen position in `0..=i`. Draws are raw
/// `u64`s from the ChaCha8 stream reduced with `below`, so the sequence
/// is identical on 32- and 64-bit targets and across `rand` releases.
pub fn shuffled_indices(len: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    if len <= 1 {
        return indices;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for i in (1..len).rev() {
        let j = below(&mut rng, i as u64 + 1) as usize;
        indices.swap(i, j);
    }
    indices
}

/// Uniform value in `0..bound` by widening multiply with rejection (Lemire).
fn below(rng: &mut impl RngCore, bound: u64) -> u64 {
    let threshold = bound.wrapping_neg() % bound;
    loop {
        let wide = u128::from(rng.next_u64()) * u128::from(bound);
        if wide as u64 >= threshold {
            return (wide >> 64) as u64;
        }
    }
}

/// Reorder `items` by an index order, e.g. one produced by [`shuffled_indices`].
///
/// Indices out of range are skipped.
pub fn permute<T: Clone>(items: &[T], order: &[usize]) -> Vec<T> {
    order.iter().filter_map(|&i| items.get(i).cloned()).collect()
}
