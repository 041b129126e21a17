//! Candidate grouping: band buckets to union-find edges.
//!
//! Records are grouped by `(band_index, band_fingerprint)` in insertion
//! order so runs are reproducible. Each bucket with at least two documents
//! emits a spanning star rooted at the minimum id, which preserves
//! connectivity under union-find at `k - 1` edges instead of the
//! `k * (k - 1) / 2` of a clique.

use crate::minhash::lsh::BandRecord;
use indexmap::IndexMap;

/// An unordered candidate pair consumed by union-find.
pub type Edge = (u64, u64);

/// Group band records into buckets and emit star edges.
///
/// The root of every star is the minimum document id of its bucket, so the
/// emitted edge list is invariant to the order of documents within a
/// bucket.
pub fn group_edges(records: impl IntoIterator<Item = BandRecord>) -> Vec<Edge> {
    let mut buckets: IndexMap<(u32, u64), Vec<u64>> = IndexMap::new();
    for rec in records {
        buckets
            .entry((rec.band, rec.fingerprint))
            .or_default()
            .push(rec.doc_id);
    }

    let mut edges = Vec::new();
    for ids in buckets.values() {
        if ids.len() < 2 {
            continue;
        }
        let Some(root) = ids.iter().copied().min() else {
            continue;
        };
        for &id in ids {
            if id != root {
                edges.push((root, id));
            }
        }
    }
    edges
}
