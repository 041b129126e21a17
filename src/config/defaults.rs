//! Default values for deduplication runs.

/// Default number of permutations.
pub const DEFAULT_NUM_PERM: usize = 200;

/// Default n-gram size in tokens.
pub const DEFAULT_NGRAM: usize = 2;

/// Default Jaccard threshold for band/row optimization.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default minimum token count; zero keeps everything.
pub const DEFAULT_MIN_LENGTH: usize = 0;

/// Default number of documents per embed batch.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Default RNG seed for the permutation bank.
pub const DEFAULT_SEED: u64 = 42;

/// Default weight of the false-positive area in the optimizer.
pub const DEFAULT_FP_WEIGHT: f64 = 0.5;

/// Default weight of the false-negative area in the optimizer.
pub const DEFAULT_FN_WEIGHT: f64 = 0.5;

/// Environment variable forcing deterministic permutation seeding.
pub const DETERMINISTIC_ENV: &str = "DETERMINISTIC";
