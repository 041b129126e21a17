//! Seedable content hashing for n-grams and band fingerprints.
//!
//! XXH3 is the one hash family used throughout: full-width for band
//! fingerprints, truncated to the configured element width for n-gram
//! hashing. Determinism across runs and machines (of matching endianness)
//! is part of the contract.

use crate::minhash::width::HashWidth;
use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

/// Hash arbitrary bytes to 64 bits.
#[inline]
pub fn hash_bytes(data: &[u8]) -> u64 {
    xxh3_64(data)
}

/// Hash arbitrary bytes to 64 bits under an explicit seed.
#[inline]
pub fn hash_bytes_seeded(data: &[u8], seed: u64) -> u64 {
    xxh3_64_with_seed(data, seed)
}

/// Hash an n-gram to the element width of `W`.
#[inline]
pub fn ngram_hash<W: HashWidth>(data: &[u8]) -> u64 {
    W::truncate(xxh3_64(data))
}
