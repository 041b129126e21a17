//! MinHash signature computation.
//!
//! For each document the embedder hashes every n-gram once, then reduces
//! the permuted values into a running element-wise minimum. Work is
//! data-parallel across documents; the inner loop across permutations is
//! monomorphic per hash width.

use crate::minhash::hasher::ngram_hash;
use crate::minhash::permutations::PermutationBank;
use crate::minhash::tokenizer;
use crate::minhash::width::HashWidth;
use rayon::prelude::*;
use std::collections::HashSet;

/// A batch of signatures in a flat row-major buffer.
///
/// Row `i` holds the `num_perm` signature elements of document `ids[i]`.
#[derive(Debug, Clone)]
pub struct SignatureBatch<W: HashWidth> {
    ids: Vec<u64>,
    data: Vec<W::Elem>,
    num_perm: usize,
}

impl<W: HashWidth> SignatureBatch<W> {
    /// Number of documents in the batch.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Signature length shared by every row.
    pub fn num_perm(&self) -> usize {
        self.num_perm
    }

    /// Document ids in batch order.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// The signature row of document `i`.
    pub fn signature(&self, i: usize) -> &[W::Elem] {
        &self.data[i * self.num_perm..(i + 1) * self.num_perm]
    }

    /// Iterate `(doc_id, signature)` pairs in batch order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[W::Elem])> {
        self.ids
            .iter()
            .copied()
            .zip(self.data.chunks_exact(self.num_perm))
    }

    /// Parallel iterator over `(doc_id, signature)` pairs, order-preserving.
    pub fn par_iter(&self) -> impl IndexedParallelIterator<Item = (u64, &[W::Elem])> {
        self.ids
            .par_iter()
            .copied()
            .zip(self.data.par_chunks_exact(self.num_perm))
    }
}

/// MinHash embedder: owns the permutation bank for the run.
#[derive(Debug, Clone)]
pub struct Embedder<W: HashWidth> {
    bank: PermutationBank<W>,
    ngram: usize,
}

impl<W: HashWidth> Embedder<W> {
    /// Create an embedder over `bank` with token n-grams of size `ngram`.
    pub fn new(bank: PermutationBank<W>, ngram: usize) -> Self {
        Self { bank, ngram }
    }

    /// Signature length.
    pub fn num_perm(&self) -> usize {
        self.bank.num_perm()
    }

    /// Embed one document into a caller-provided signature row.
    ///
    /// A document with an empty n-gram set (too few tokens for `ngram`)
    /// produces a row saturated at `MAX_HASH`; this is not an error.
    pub fn embed_into(&self, text: &str, out: &mut [W::Elem]) {
        debug_assert_eq!(out.len(), self.num_perm());

        let toks = tokenizer::tokens(text);
        let mut hashes: HashSet<u64> = HashSet::with_capacity(toks.len());
        let mut scratch = Vec::with_capacity(64);
        tokenizer::each_ngram(&toks, self.ngram, &mut scratch, |g| {
            hashes.insert(ngram_hash::<W>(g));
        });

        out.fill(W::EMPTY);
        if hashes.is_empty() {
            tracing::debug!("document yielded no n-grams; emitting saturated signature");
            return;
        }

        let a = self.bank.a();
        let b = self.bank.b();
        for &h in &hashes {
            for ((slot, &ai), &bi) in out.iter_mut().zip(a).zip(b) {
                let v = W::permute(h, ai, bi);
                if v < *slot {
                    *slot = v;
                }
            }
        }
    }

    /// Embed one document into a fresh signature vector.
    pub fn embed(&self, text: &str) -> Vec<W::Elem> {
        let mut out = vec![W::EMPTY; self.num_perm()];
        self.embed_into(text, &mut out);
        out
    }

    /// Embed a batch of documents in parallel into a flat buffer.
    ///
    /// Row order follows input order, so the result is independent of the
    /// number of worker threads.
    pub fn embed_batch(&self, docs: &[(u64, String)]) -> SignatureBatch<W> {
        let num_perm = self.num_perm();
        let mut data = vec![W::EMPTY; docs.len() * num_perm];
        data.par_chunks_mut(num_perm)
            .zip(docs.par_iter())
            .for_each(|(row, (_, text))| self.embed_into(text, row));

        SignatureBatch {
            ids: docs.iter().map(|(id, _)| *id).collect(),
            data,
            num_perm,
        }
    }
}
