//! LSH banding of MinHash signatures.
//!
//! A signature of length `num_perm = B * R` is split into `B` bands of `R`
//! rows. Each band is fingerprinted with XXH3-64 over the little-endian
//! serialization of its elements, and the band index travels with the
//! fingerprint so equal fingerprints in different bands never collide into
//! the same bucket.

use crate::error::{DedupError, Result};
use crate::minhash::embed::SignatureBatch;
use crate::minhash::hasher::hash_bytes;
use crate::minhash::width::HashWidth;
use rayon::prelude::*;

/// One `(band_index, band_fingerprint) -> document` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRecord {
    pub band: u32,
    pub fingerprint: u64,
    pub doc_id: u64,
}

/// Splits signatures into bands and emits grouping records.
#[derive(Debug, Clone, Copy)]
pub struct Bander {
    bands: usize,
    rows: usize,
}

impl Bander {
    /// Create a bander for `bands * rows`-length signatures.
    pub fn new(bands: usize, rows: usize) -> Self {
        Self { bands, rows }
    }

    /// Number of bands.
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Rows per band.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Fingerprint one band slice.
    fn fingerprint<W: HashWidth>(slice: &[W::Elem], buf: &mut Vec<u8>) -> u64 {
        serialize_band::<W>(slice, buf);
        hash_bytes(buf)
    }

    /// Emit the band records of every signature in the batch, in document
    /// order with ascending band index per document.
    pub fn band_records<W: HashWidth>(&self, batch: &SignatureBatch<W>) -> Result<Vec<BandRecord>> {
        if batch.num_perm() != self.bands * self.rows {
            return Err(DedupError::internal(
                "band",
                format!(
                    "signature length {} does not match {} bands x {} rows",
                    batch.num_perm(),
                    self.bands,
                    self.rows
                ),
            ));
        }

        let records: Vec<Vec<BandRecord>> = batch
            .par_iter()
            .map(|(doc_id, signature)| {
                let mut buf = Vec::with_capacity(self.rows * W::ELEM_BYTES);
                signature
                    .chunks_exact(self.rows)
                    .enumerate()
                    .map(|(band, slice)| BandRecord {
                        band: band as u32,
                        fingerprint: Self::fingerprint::<W>(slice, &mut buf),
                        doc_id,
                    })
                    .collect()
            })
            .collect();

        Ok(records.into_iter().flatten().collect())
    }
}

/// Serialize a band slice into `buf` as little-endian element bytes.
///
/// The result is always `slice.len() * ELEM_BYTES` bytes.
fn serialize_band<W: HashWidth>(slice: &[W::Elem], buf: &mut Vec<u8>) {
    buf.clear();
    for &e in slice {
        W::extend_le_bytes(e, buf);
    }
}
