//! Execution engine error types
//!
//! Engine-layer failures pass through the lookup aggregator unmodified;
//! retry policy, if any, belongs to the engine or its caller.

use thiserror::Error;

/// Result type for engine execution
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Errors produced while executing a stage sequence
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    /// A stage named a collection the engine does not hold
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// A stored document is not shaped as an object
    #[error("Malformed document in '{collection}': {reason}")]
    MalformedDocument {
        /// Collection holding the document
        collection: String,
        /// What was wrong with it
        reason: String,
    },
}

impl ExecutorError {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::UnknownCollection(_) => "AERO_EXEC_UNKNOWN_COLLECTION",
            ExecutorError::MalformedDocument { .. } => "AERO_EXEC_MALFORMED_DOCUMENT",
        }
    }
}
