//! Error types for pruning

use idlprune_ast::Span;
use idlprune_store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PruneError>;

/// Errors that abort a crop or prune run
///
/// None of these are recoverable: the reachability closure cannot be
/// computed, or the reservation store cannot be addressed.
#[derive(Debug, Error)]
pub enum PruneError {
    /// E-PRUNE-001: qualified reference whose qualifier names no include of the file
    #[error("{file}:{span}: `{name}` does not refer to an include of this file")]
    MalformedReference {
        file: String,
        name: String,
        span: Span,
    },

    /// E-PRUNE-002: include edge pointing outside the file graph
    #[error("{file}: include `{include}` has no document in the graph")]
    UnknownInclude { file: String, include: String },

    /// E-PRUNE-003: file reachable from itself through includes
    #[error("circular include detected: {cycle}")]
    CyclicInclude {
        /// Full cycle path, e.g. "a.thrift -> b.thrift -> a.thrift"
        cycle: String,
    },

    /// E-PRUNE-004: repository identity of a file cannot be determined
    #[error("cannot determine repository of {file}: {source}")]
    Identity {
        file: String,
        #[source]
        source: StoreError,
    },

    /// E-PRUNE-005: reservation store cannot be read or written
    #[error("reservation store: {0}")]
    Store(#[from] StoreError),
}

impl PruneError {
    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            PruneError::MalformedReference { .. } => "E-PRUNE-001",
            PruneError::UnknownInclude { .. } => "E-PRUNE-002",
            PruneError::CyclicInclude { .. } => "E-PRUNE-003",
            PruneError::Identity { .. } => "E-PRUNE-004",
            PruneError::Store(_) => "E-PRUNE-005",
        }
    }
}
