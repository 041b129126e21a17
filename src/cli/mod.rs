//! CLI command handling for the `dedup` binary.
//!
//! The binary is a thin wrapper: it loads `(id, text)` pairs from parquet,
//! hands them to the core pipeline, and reports `{"before": N, "after": M}`
//! as the final stdout line. Every error kind maps to a distinct exit code
//! for scripting.

pub mod parquet;

use crate::config::DedupConfig;
use crate::error::{DedupError, Result};
use crate::pipeline::{self, Summary};
use std::path::Path;

/// Exit codes for scripting against the `dedup` binary.
pub mod exit_codes {
    /// Success.
    pub const SUCCESS: i32 = 0;
    /// Inconsistent configuration.
    pub const CONFIG: i32 = 2;
    /// Malformed input at the corpus boundary.
    pub const INPUT: i32 = 3;
    /// Cooperative cancellation fired.
    pub const CANCELLED: i32 = 4;
    /// IO or persistence failure.
    pub const IO: i32 = 5;
    /// Internal invariant violation.
    pub const INTERNAL: i32 = 6;
}

/// Map an error to its exit code.
pub fn exit_code_for(err: &DedupError) -> i32 {
    match err {
        DedupError::Config(_) => exit_codes::CONFIG,
        DedupError::Input(_) => exit_codes::INPUT,
        DedupError::Cancelled => exit_codes::CANCELLED,
        DedupError::Io { .. } | DedupError::Save { .. } => exit_codes::IO,
        DedupError::Internal { .. } => exit_codes::INTERNAL,
    }
}

/// Load a parquet corpus and run the deduplication pipeline over it.
pub fn run_dedup(
    config: &DedupConfig,
    parquet_path: &Path,
    main_col: &str,
    idx_col: &str,
) -> Result<Summary> {
    let docs = parquet::read_documents(parquet_path, main_col, idx_col)?;
    pipeline::run(config, docs)
}
