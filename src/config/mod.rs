//! Configuration for deduplication runs.
//!
//! [`DedupConfig`] collects every knob of the pipeline with the documented
//! defaults; [`Validatable`] reports all inconsistencies at once; parameter
//! resolution derives `(b, r)` from the threshold when they are not pinned.
//!
//! ```
//! use text_dedup::config::DedupConfig;
//!
//! let config = DedupConfig::builder()
//!     .num_perm(64)
//!     .bands(16, 4)
//!     .ngram(2)
//!     .build();
//! let params = config.resolve_params().unwrap();
//! assert_eq!(params.num_perm, params.b * params.r);
//! ```

mod defaults;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_BATCH_SIZE, DEFAULT_FN_WEIGHT, DEFAULT_FP_WEIGHT, DEFAULT_MIN_LENGTH, DEFAULT_NGRAM,
    DEFAULT_NUM_PERM, DEFAULT_SEED, DEFAULT_THRESHOLD, DETERMINISTIC_ENV,
};
pub use types::{DedupConfig, DedupConfigBuilder, HashBits, ResolvedParams};
pub use validation::{ConfigFinding, Validatable};

/// Interpret the value of the `DETERMINISTIC` environment variable.
///
/// Only `1` (and case-insensitive `true`) enable deterministic seeding;
/// everything else, including empty, is off.
pub fn deterministic_from_env(value: &str) -> bool {
    matches!(value.trim(), "1") || value.trim().eq_ignore_ascii_case("true")
}
