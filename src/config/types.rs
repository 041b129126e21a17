//! Configuration types for deduplication runs.

use super::defaults::*;
use crate::error::{DedupError, Result};
use crate::minhash::optimizer::optimal_param;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Signature element width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashBits {
    /// 16-bit elements.
    #[serde(rename = "16")]
    B16,
    /// 32-bit elements.
    #[serde(rename = "32")]
    B32,
    /// Legacy mode: 32-bit data in 64-bit slots, compatible with prior
    /// outputs.
    #[serde(rename = "64")]
    B64,
}

impl HashBits {
    /// Parse from the numeric CLI/config form.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(Self::B16),
            32 => Some(Self::B32),
            64 => Some(Self::B64),
            _ => None,
        }
    }

    /// The numeric width.
    pub const fn bits(self) -> u32 {
        match self {
            Self::B16 => 16,
            Self::B32 => 32,
            Self::B64 => 64,
        }
    }
}

impl Default for HashBits {
    fn default() -> Self {
        Self::B64
    }
}

impl std::fmt::Display for HashBits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Configuration for a deduplication run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Number of permutations; must equal `b * r` when both are given.
    pub num_perm: usize,
    /// Number of bands. Derived with `r` from the threshold when absent.
    pub b: Option<usize>,
    /// Rows per band. Derived with `b` from the threshold when absent.
    pub r: Option<usize>,
    /// N-gram size in tokens.
    pub ngram: usize,
    /// Jaccard threshold driving band/row optimization.
    pub threshold: f64,
    /// Documents with fewer tokens are dropped before embedding.
    pub min_length: usize,
    /// Signature element width.
    pub hash_bits: HashBits,
    /// Documents per embed batch.
    pub batch_size: usize,
    /// Worker threads for the embed and band phases.
    pub num_threads: usize,
    /// Seed for the permutation RNG.
    pub seed: u64,
    /// Force deterministic permutation seeding (also enabled by the
    /// `DETERMINISTIC=1` environment variable).
    pub deterministic: bool,
    /// False-positive weight for the optimizer.
    pub fp_weight: f64,
    /// False-negative weight for the optimizer.
    pub fn_weight: f64,
    /// Where to persist the union-find after clustering, if anywhere.
    pub uf_output: Option<PathBuf>,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            num_perm: DEFAULT_NUM_PERM,
            b: None,
            r: None,
            ngram: DEFAULT_NGRAM,
            threshold: DEFAULT_THRESHOLD,
            min_length: DEFAULT_MIN_LENGTH,
            hash_bits: HashBits::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            num_threads: num_cpus::get(),
            seed: DEFAULT_SEED,
            deterministic: false,
            fp_weight: DEFAULT_FP_WEIGHT,
            fn_weight: DEFAULT_FN_WEIGHT,
            uf_output: None,
        }
    }
}

/// Effective banding parameters after validation and optimization.
///
/// `num_perm == b * r` always holds here; when the optimizer returns a pair
/// that undershoots the requested permutation budget, the effective
/// `num_perm` shrinks to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedParams {
    pub b: usize,
    pub r: usize,
    pub num_perm: usize,
}

impl DedupConfig {
    /// Create a builder.
    pub fn builder() -> DedupConfigBuilder {
        DedupConfigBuilder::default()
    }

    /// Whether deterministic permutation seeding is in effect, from either
    /// the config flag or the `DETERMINISTIC=1` environment variable.
    pub fn deterministic_enabled(&self) -> bool {
        self.deterministic
            || std::env::var(DETERMINISTIC_ENV)
                .map(|v| super::deterministic_from_env(&v))
                .unwrap_or(false)
    }

    /// Resolve `(b, r, num_perm)`, deriving bands and rows from the
    /// threshold when either is unset.
    pub fn resolve_params(&self) -> Result<ResolvedParams> {
        self.validate_strict()?;

        if let (Some(b), Some(r)) = (self.b, self.r) {
            return Ok(ResolvedParams {
                b,
                r,
                num_perm: self.num_perm,
            });
        }

        let (b, r) = optimal_param(self.threshold, self.num_perm, self.fp_weight, self.fn_weight);
        let num_perm = b * r;
        if num_perm < self.num_perm {
            tracing::info!(
                requested = self.num_perm,
                effective = num_perm,
                b,
                r,
                "optimizer undershot the permutation budget; shrinking num_perm"
            );
        }
        Ok(ResolvedParams { b, r, num_perm })
    }

    /// Validate, folding all findings into a single [`DedupError::Config`].
    pub fn validate_strict(&self) -> Result<()> {
        use super::validation::Validatable;
        let findings = self.validate();
        if findings.is_empty() {
            Ok(())
        } else {
            let joined = findings
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            Err(DedupError::config(joined))
        }
    }
}

/// Builder for [`DedupConfig`] with a fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct DedupConfigBuilder {
    config: DedupConfig,
}

impl DedupConfigBuilder {
    /// Set the number of permutations.
    pub const fn num_perm(mut self, num_perm: usize) -> Self {
        self.config.num_perm = num_perm;
        self
    }

    /// Set bands and rows explicitly.
    pub const fn bands(mut self, b: usize, r: usize) -> Self {
        self.config.b = Some(b);
        self.config.r = Some(r);
        self
    }

    /// Set the n-gram size.
    pub const fn ngram(mut self, ngram: usize) -> Self {
        self.config.ngram = ngram;
        self
    }

    /// Set the Jaccard threshold.
    pub const fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set the minimum token count.
    pub const fn min_length(mut self, min_length: usize) -> Self {
        self.config.min_length = min_length;
        self
    }

    /// Set the signature element width.
    pub const fn hash_bits(mut self, hash_bits: HashBits) -> Self {
        self.config.hash_bits = hash_bits;
        self
    }

    /// Set the embed batch size.
    pub const fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Set the worker thread count.
    pub const fn num_threads(mut self, num_threads: usize) -> Self {
        self.config.num_threads = num_threads;
        self
    }

    /// Set the permutation RNG seed.
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Force deterministic permutation seeding.
    pub const fn deterministic(mut self, deterministic: bool) -> Self {
        self.config.deterministic = deterministic;
        self
    }

    /// Set the union-find output path.
    pub fn uf_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.uf_output = Some(path.into());
        self
    }

    /// Finish building.
    pub fn build(self) -> DedupConfig {
        self.config
    }
}
