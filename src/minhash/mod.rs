//! The fingerprinting core: tokenization, MinHash embedding, LSH banding,
//! candidate grouping, and band/row parameter selection.
//!
//! The embedding hot path is generic over [`width::HashWidth`] so each
//! supported element width (16, 32, and the legacy 64-bit mode) gets a
//! monomorphic inner loop.

pub mod embed;
pub mod grouper;
pub mod hasher;
pub mod lsh;
pub mod optimizer;
pub mod permutations;
pub mod tokenizer;
pub mod width;

pub use embed::{Embedder, SignatureBatch};
pub use grouper::{group_edges, Edge};
pub use lsh::{BandRecord, Bander};
pub use optimizer::optimal_param;
pub use permutations::PermutationBank;
pub use width::{HashWidth, U16, U32, U64Legacy};
