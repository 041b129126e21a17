//! Hash-width instantiation for the MinHash pipeline.
//!
//! The embedder is generic over [`HashWidth`] so the per-n-gram inner loop
//! is monomorphic for each supported element width instead of branching on
//! `hash_bits` at runtime. Three widths are supported:
//!
//! - [`U64Legacy`]: 32-bit hash data carried in 64-bit slots, modulus
//!   `2^61 - 1` (Mersenne), compatible with legacy outputs.
//! - [`U32`]: 32-bit elements, modulus `2^32 - 5`.
//! - [`U16`]: 16-bit elements, modulus `2^16 - 15`.

use std::fmt::Debug;
use std::hash::Hash;

/// Mersenne prime `2^61 - 1`, the modulus of the legacy 64-bit mode.
pub const MERSENNE_61: u64 = (1u64 << 61) - 1;

/// Largest prime below `2^32`.
pub const PRIME_32: u64 = u32::MAX as u64 - 4; // 2^32 - 5

/// Largest prime below `2^16`.
pub const PRIME_16: u64 = u16::MAX as u64 - 14; // 2^16 - 15 = 65521

/// Reduce `x` modulo the Mersenne prime `2^61 - 1` with shifts and adds.
///
/// Valid for any `x < 2^125`, which covers `a * h + b` with
/// `a, b < 2^61` and `h < 2^64`.
#[inline]
pub fn mod_mersenne_61(x: u128) -> u64 {
    let m = u128::from(MERSENNE_61);
    let folded = (x & m) + (x >> 61);
    let folded = (folded & m) + (folded >> 61);
    let mut r = folded as u64;
    if r >= MERSENNE_61 {
        r -= MERSENNE_61;
    }
    r
}

/// Element width of a MinHash signature.
///
/// Implementations provide the constants of the universal hash family
/// `h_i(x) = ((a_i * x + b_i) mod P) mod MAX_HASH` and a monomorphic
/// [`permute`](HashWidth::permute) for the hot loop.
pub trait HashWidth: Copy + Send + Sync + 'static {
    /// Signature element type.
    type Elem: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static;

    /// Nominal width in bits (the `hash_bits` configuration value).
    const BITS: u32;

    /// Size of one serialized element in bytes.
    const ELEM_BYTES: usize;

    /// Upper bound of signature values; also the fill value for documents
    /// with an empty n-gram set.
    const MAX_HASH: u64;

    /// Modulus prime of the permutation family.
    const PRIME: u64;

    /// The all-empty signature element (`MAX_HASH` at element width).
    const EMPTY: Self::Elem;

    /// Truncate a raw 64-bit n-gram hash to this width.
    fn truncate(h: u64) -> u64;

    /// Apply one permutation to a (truncated) n-gram hash.
    fn permute(h: u64, a: u64, b: u64) -> Self::Elem;

    /// Append the little-endian serialization of `e` to `buf`.
    fn extend_le_bytes(e: Self::Elem, buf: &mut Vec<u8>);

    /// Widen an element for width-independent assertions.
    fn to_u64(e: Self::Elem) -> u64;
}

/// Legacy 64-bit mode: 32-bit values in 64-bit slots, Mersenne modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct U64Legacy;

impl HashWidth for U64Legacy {
    type Elem = u64;

    const BITS: u32 = 64;
    const ELEM_BYTES: usize = 8;
    const MAX_HASH: u64 = u32::MAX as u64;
    const PRIME: u64 = MERSENNE_61;
    const EMPTY: u64 = u32::MAX as u64;

    #[inline]
    fn truncate(h: u64) -> u64 {
        h
    }

    #[inline]
    fn permute(h: u64, a: u64, b: u64) -> u64 {
        let x = u128::from(a) * u128::from(h) + u128::from(b);
        mod_mersenne_61(x) % Self::MAX_HASH
    }

    #[inline]
    fn extend_le_bytes(e: u64, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&e.to_le_bytes());
    }

    #[inline]
    fn to_u64(e: u64) -> u64 {
        e
    }
}

/// 32-bit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct U32;

impl HashWidth for U32 {
    type Elem = u32;

    const BITS: u32 = 32;
    const ELEM_BYTES: usize = 4;
    const MAX_HASH: u64 = u32::MAX as u64;
    const PRIME: u64 = PRIME_32;
    const EMPTY: u32 = u32::MAX;

    #[inline]
    fn truncate(h: u64) -> u64 {
        h & u64::from(u32::MAX)
    }

    #[inline]
    fn permute(h: u64, a: u64, b: u64) -> u32 {
        // a, b, h all fit in 32 bits, so a * h + b < 2^64.
        ((a * h + b) % Self::PRIME % Self::MAX_HASH) as u32
    }

    #[inline]
    fn extend_le_bytes(e: u32, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&e.to_le_bytes());
    }

    #[inline]
    fn to_u64(e: u32) -> u64 {
        u64::from(e)
    }
}

/// 16-bit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct U16;

impl HashWidth for U16 {
    type Elem = u16;

    const BITS: u32 = 16;
    const ELEM_BYTES: usize = 2;
    const MAX_HASH: u64 = u16::MAX as u64;
    const PRIME: u64 = PRIME_16;
    const EMPTY: u16 = u16::MAX;

    #[inline]
    fn truncate(h: u64) -> u64 {
        h & u64::from(u16::MAX)
    }

    #[inline]
    fn permute(h: u64, a: u64, b: u64) -> u16 {
        ((a * h + b) % Self::PRIME % Self::MAX_HASH) as u16
    }

    #[inline]
    fn extend_le_bytes(e: u16, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&e.to_le_bytes());
    }

    #[inline]
    fn to_u64(e: u16) -> u64 {
        u64::from(e)
    }
}
