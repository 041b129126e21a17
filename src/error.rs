//! Unified error types for text-dedup.
//!
//! Every fallible operation in the library returns [`DedupError`]. The
//! variants map one-to-one onto the failure classes the pipeline can hit:
//! bad configuration, malformed input, cooperative cancellation, IO, and
//! internal invariant violations.

use crate::cluster::UnionFind;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for text-dedup operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DedupError {
    /// Inconsistent configuration (e.g. `b * r != num_perm`).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Malformed input record at the corpus boundary.
    #[error("malformed input: {0}")]
    Input(String),

    /// Cooperative cancellation fired; no output was written.
    #[error("operation cancelled")]
    Cancelled,

    /// IO error with path context.
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Persisting the union-find failed. The in-memory structure is carried
    /// along so the caller may retry the dump.
    #[error("failed to persist union-find to {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        union_find: Box<UnionFind>,
    },

    /// Invariant violation; indicates a bug rather than bad input.
    #[error("internal invariant violated in {phase} phase{}: {message}", doc_context(.doc_id))]
    Internal {
        phase: &'static str,
        doc_id: Option<u64>,
        message: String,
    },
}

fn doc_context(doc_id: &Option<u64>) -> String {
    match doc_id {
        Some(id) => format!(" (document {id})"),
        None => String::new(),
    }
}

/// Convenient Result type for text-dedup operations.
pub type Result<T> = std::result::Result<T, DedupError>;

impl DedupError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create an internal error attributed to a pipeline phase.
    pub fn internal(phase: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            phase,
            doc_id: None,
            message: message.into(),
        }
    }

    /// Create an internal error attributed to a phase and a document.
    pub fn internal_for_doc(phase: &'static str, doc_id: u64, message: impl Into<String>) -> Self {
        Self::Internal {
            phase,
            doc_id: Some(doc_id),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for DedupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}
