//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by the in-memory store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Documents must be JSON objects
    #[error("Document for '{collection}' must be an object")]
    NotAnObject {
        /// Collection the insert targeted
        collection: String,
    },

    /// Caller-supplied identifier must be a string
    #[error("Document id for '{collection}' must be a string")]
    InvalidId {
        /// Collection the insert targeted
        collection: String,
    },
}
