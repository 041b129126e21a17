//! The deduplication driver.
//!
//! Phases run in order: Load -> Filter -> Embed -> Band -> Group -> Union ->
//! Keep -> Save. Embed and Band are fused per batch so signature memory is
//! bounded by the batch size; every other phase completes before the next
//! begins. The union-find is owned here and mutated only during the union
//! phase, on a single thread.

use crate::cluster::UnionFind;
use crate::config::{DedupConfig, HashBits, ResolvedParams};
use crate::error::{DedupError, Result};
use crate::minhash::{
    group_edges, Bander, Embedder, HashWidth, PermutationBank, U16, U32, U64Legacy,
};
use crate::minhash::tokenizer;
use crate::pipeline::cancel::CancellationToken;
use crate::pipeline::timer::PhaseTimer;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Run statistics returned by [`run`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Documents entering deduplication (after the min-length filter).
    pub before: u64,
    /// Documents kept (cluster representatives).
    pub after: u64,
    /// Successful merges performed by the union phase.
    pub edges: u64,
    /// Wall-clock milliseconds per phase, in execution order.
    pub elapsed_ms: IndexMap<String, u64>,
}

/// Full result of a run: the summary plus the artifacts the caller may want
/// to inspect or persist differently.
#[derive(Debug)]
pub struct RunOutput {
    /// Run statistics.
    pub summary: Summary,
    /// The union-find after clustering.
    pub union_find: UnionFind,
    /// Kept document ids in input order.
    pub kept: Vec<u64>,
}

/// Deduplicate `documents` and return the run summary.
pub fn run(
    config: &DedupConfig,
    documents: impl IntoIterator<Item = (u64, String)>,
) -> Result<Summary> {
    run_full(config, documents).map(|output| output.summary)
}

/// Deduplicate `documents`, returning the union-find and kept-id list
/// alongside the summary.
pub fn run_full(
    config: &DedupConfig,
    documents: impl IntoIterator<Item = (u64, String)>,
) -> Result<RunOutput> {
    run_with_cancellation(config, documents, &CancellationToken::new())
}

/// Like [`run_full`] with a cooperative cancellation token, checked at phase
/// boundaries and at every embed batch. On cancellation partial state is
/// discarded and nothing is written.
pub fn run_with_cancellation(
    config: &DedupConfig,
    documents: impl IntoIterator<Item = (u64, String)>,
    token: &CancellationToken,
) -> Result<RunOutput> {
    let params = config.resolve_params()?;
    tracing::debug!(
        b = params.b,
        r = params.r,
        num_perm = params.num_perm,
        ngram = config.ngram,
        min_length = config.min_length,
        hash_bits = %config.hash_bits,
        "starting deduplication run"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build()
        .map_err(|e| DedupError::internal("load", format!("failed to build thread pool: {e}")))?;

    let mut timer = PhaseTimer::new();
    token.check()?;

    let docs: Vec<(u64, String)> = timer.time("load", || documents.into_iter().collect());
    let loaded = docs.len();
    token.check()?;

    let min_length = config.min_length;
    let docs: Vec<(u64, String)> = timer.time("filter", || {
        if min_length == 0 {
            docs
        } else {
            pool.install(|| {
                docs.into_par_iter()
                    .filter(|(_, text)| tokenizer::token_count(text) >= min_length)
                    .collect()
            })
        }
    });
    if docs.len() < loaded {
        tracing::info!(
            dropped = loaded - docs.len(),
            min_length,
            "dropped documents below minimum token count"
        );
    }
    token.check()?;

    match config.hash_bits {
        HashBits::B16 => run_typed::<U16>(config, params, docs, token, &pool, timer),
        HashBits::B32 => run_typed::<U32>(config, params, docs, token, &pool, timer),
        HashBits::B64 => run_typed::<U64Legacy>(config, params, docs, token, &pool, timer),
    }
}

fn build_bank<W: HashWidth>(config: &DedupConfig, num_perm: usize) -> PermutationBank<W> {
    if config.deterministic_enabled() {
        tracing::debug!("using deterministic permutation seeding");
        PermutationBank::deterministic(num_perm)
    } else {
        let mut rng = StdRng::seed_from_u64(config.seed);
        PermutationBank::from_rng(&mut rng, num_perm)
    }
}

fn run_typed<W: HashWidth>(
    config: &DedupConfig,
    params: ResolvedParams,
    docs: Vec<(u64, String)>,
    token: &CancellationToken,
    pool: &rayon::ThreadPool,
    mut timer: PhaseTimer,
) -> Result<RunOutput> {
    let before = docs.len() as u64;
    let embedder: Embedder<W> = Embedder::new(build_bank(config, params.num_perm), config.ngram);
    let bander = Bander::new(params.b, params.r);

    // Embed and band, fused per batch to bound signature memory.
    let mut records = Vec::with_capacity(docs.len() * params.b);
    for chunk in docs.chunks(config.batch_size) {
        token.check()?;

        let start = Instant::now();
        let batch = pool.install(|| embedder.embed_batch(chunk));
        timer.add("embed", start.elapsed());

        let start = Instant::now();
        let chunk_records = pool.install(|| bander.band_records(&batch))?;
        timer.add("band", start.elapsed());
        records.extend(chunk_records);
    }
    token.check()?;

    let edges = timer.time("group", || group_edges(records));
    tracing::debug!(candidate_edges = edges.len(), "grouped band buckets");
    token.check()?;

    let mut union_find = UnionFind::new();
    let mut merges = 0u64;
    timer.time("union", || {
        for &(a, b) in &edges {
            if union_find.union(a, b) {
                merges += 1;
            }
        }
    });
    token.check()?;

    let kept: Vec<u64> = timer.time("keep", || {
        docs.iter()
            .map(|(id, _)| *id)
            .filter(|&id| union_find.root(id) == id)
            .collect()
    });
    let after = kept.len() as u64;

    if let Some(path) = &config.uf_output {
        let start = Instant::now();
        if let Err(source) = union_find.dump(path) {
            return Err(DedupError::Save {
                path: path.clone(),
                source,
                union_find: Box::new(union_find),
            });
        }
        timer.add("save", start.elapsed());
    }

    timer.report();
    tracing::info!(before, after, edges = merges, "deduplication complete");

    Ok(RunOutput {
        summary: Summary {
            before,
            after,
            edges: merges,
            elapsed_ms: timer.elapsed_ms(),
        },
        union_find,
        kept,
    })
}
