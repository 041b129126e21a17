//! **Near-duplicate detection for large text corpora.**
//!
//! `text-dedup` fingerprints documents with MinHash, finds candidate
//! duplicate pairs with banded locality-sensitive hashing (LSH), and merges
//! candidates into clusters with a union-find. For each document it can
//! then report a cluster representative such that any two documents in the
//! same cluster have estimated Jaccard similarity above a configured
//! threshold with high probability.
//!
//! ## Pipeline
//!
//! ```text
//! (id, text) -> tokenizer -> n-gram set -> MinHash embedder -> signature
//!            -> LSH bander -> (band, fingerprint, id) -> grouper -> edges
//!            -> union-find -> cluster assignment -> keep-set
//! ```
//!
//! - **[`minhash`]** holds the fingerprinting core: tokenization into word
//!   n-grams, the permutation bank, the width-generic embedder, band
//!   fingerprinting, candidate grouping, and `(B, R)` parameter selection.
//! - **[`cluster`]** is the union-find with JSON persistence.
//! - **[`pipeline`]** drives the phases (Load, Filter, Embed, Band, Group,
//!   Union, Keep, Save) with per-phase timing and cooperative cancellation.
//! - **[`cli`]** backs the `dedup` binary: parquet ingestion and exit-code
//!   mapping. The core never touches files except union-find persistence.
//!
//! ## Quick start
//!
//! ```
//! use text_dedup::{run_full, DedupConfig};
//!
//! let config = DedupConfig::builder()
//!     .num_perm(64)
//!     .bands(16, 4)
//!     .deterministic(true)
//!     .build();
//!
//! let docs = vec![
//!     (1, "the quick brown fox jumps over the lazy dog".to_string()),
//!     (2, "the quick brown fox jumps over the lazy dog".to_string()),
//!     (3, "an entirely unrelated piece of text".to_string()),
//! ];
//!
//! let output = run_full(&config, docs).unwrap();
//! assert_eq!(output.summary.before, 3);
//! assert_eq!(output.summary.after, 2);
//! assert_eq!(output.kept, vec![1, 3]);
//! ```
//!
//! ## Determinism
//!
//! The set of clusters is invariant under thread count and input order; the
//! chosen representatives are reproducible because bucket roots and
//! union-by-rank ties both resolve toward the numerically smaller id. With
//! deterministic seeding (the `deterministic` config flag or
//! `DETERMINISTIC=1` in the environment), whole runs are byte-for-byte
//! reproducible, union-find dumps included.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: usize<->u64/f64 casts are pervasive in the statistics
    // and timing paths and all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod minhash;
pub mod pipeline;

// Re-export main types for convenience
pub use cluster::UnionFind;
pub use config::{DedupConfig, DedupConfigBuilder, HashBits, ResolvedParams, Validatable};
pub use error::{DedupError, Result};
pub use minhash::{optimal_param, Bander, Embedder, PermutationBank, SignatureBatch};
pub use pipeline::{run, run_full, run_with_cancellation, CancellationToken, RunOutput, Summary};
