//! Seeded deterministic permutations.
//!
//! The same `(len, seed)` pair always produces the same order, on every
//! platform. The generator is ChaCha8 seeded through `seed_from_u64`, whose
//! output stream is fixed by `rand_core` and does not depend on pointer width
//! or endianness, and positions are drawn with a fixed reduction rather
//! than `rand`'s range sampling, which may change between releases.

pub mod permutation;

pub use permutation::{MAX_SHUFFLE_LEN, permute, shuffled_indices};
