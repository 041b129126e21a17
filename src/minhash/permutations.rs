//! The permutation bank backing the universal hash family.
//!
//! Stores `num_perm` coefficient pairs `(a_i, b_i)` with `a_i ∈ [1, P)` and
//! `b_i ∈ [0, P)`. The bank is read-only after construction and freely
//! shared across embedding threads.

use crate::minhash::width::HashWidth;
use rand::Rng;
use std::marker::PhantomData;

/// Coefficient bank for the universal hash family
/// `h_i(x) = ((a_i * x + b_i) mod P) mod MAX_HASH`.
#[derive(Debug, Clone)]
pub struct PermutationBank<W: HashWidth> {
    a: Vec<u64>,
    b: Vec<u64>,
    _width: PhantomData<W>,
}

impl<W: HashWidth> PermutationBank<W> {
    /// Draw a bank from a caller-supplied RNG.
    pub fn from_rng<R: Rng>(rng: &mut R, num_perm: usize) -> Self {
        let a = (0..num_perm).map(|_| rng.gen_range(1..W::PRIME)).collect();
        let b = (0..num_perm).map(|_| rng.gen_range(0..W::PRIME)).collect();
        Self {
            a,
            b,
            _width: PhantomData,
        }
    }

    /// Deterministic bank: `a_i = b_i = 2^(hash_bits / 2) + i`.
    ///
    /// Used when the `DETERMINISTIC` flag is set so runs are byte-for-byte
    /// reproducible regardless of RNG state.
    pub fn deterministic(num_perm: usize) -> Self {
        let base = 1u64 << (W::BITS / 2);
        let coeffs: Vec<u64> = (0..num_perm as u64).map(|i| base + i).collect();
        Self {
            a: coeffs.clone(),
            b: coeffs,
            _width: PhantomData,
        }
    }

    /// Number of permutations in the bank.
    pub fn num_perm(&self) -> usize {
        self.a.len()
    }

    /// The `a` coefficients.
    pub fn a(&self) -> &[u64] {
        &self.a
    }

    /// The `b` coefficients.
    pub fn b(&self) -> &[u64] {
        &self.b
    }
}
