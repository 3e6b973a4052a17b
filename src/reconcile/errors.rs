//! Reconciliation error types
//!
//! Error codes:
//! - AERO_JOIN_INCONSISTENT (FATAL)
//! - AERO_JOIN_MALFORMED_DOCUMENT (FATAL)
//! - AERO_JOIN_HYDRATION_FAILED (FATAL)
//!
//! Every reconciliation failure means the execution engine broke its
//! contract or the compiler produced a defective pipeline. None of these
//! are recoverable per request.

use std::fmt;

/// Severity levels for reconciliation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Contract violation, the whole lookup fails
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Reconciliation-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileErrorCode {
    /// Matched set disagrees with the reference field
    AeroJoinInconsistent,
    /// Result document is not shaped as the engine promised
    AeroJoinMalformedDocument,
    /// Matched record failed hydration
    AeroJoinHydrationFailed,
}

impl ReconcileErrorCode {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ReconcileErrorCode::AeroJoinInconsistent => "AERO_JOIN_INCONSISTENT",
            ReconcileErrorCode::AeroJoinMalformedDocument => "AERO_JOIN_MALFORMED_DOCUMENT",
            ReconcileErrorCode::AeroJoinHydrationFailed => "AERO_JOIN_HYDRATION_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for ReconcileErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Reconciliation error with path context
#[derive(Debug, Clone)]
pub struct ReconcileError {
    /// Error code
    code: ReconcileErrorCode,
    /// Human-readable message
    message: String,
    /// Reference field path being reconciled
    path: String,
}

impl ReconcileError {
    /// Singular reference with no single matched document
    pub fn singular_cardinality(path: impl Into<String>, found: usize) -> Self {
        let p = path.into();
        Self {
            code: ReconcileErrorCode::AeroJoinInconsistent,
            message: format!(
                "Expected exactly one matched document for '{}', found {}",
                p, found
            ),
            path: p,
        }
    }

    /// Singular matched document carries the wrong identifier
    pub fn singular_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let p = path.into();
        Self {
            code: ReconcileErrorCode::AeroJoinInconsistent,
            message: format!(
                "Matched document for '{}' has id '{}', reference holds '{}'",
                p,
                actual.into(),
                expected.into()
            ),
            path: p,
        }
    }

    /// Matched documents left over after all identifiers were walked
    pub fn unconsumed_matches(path: impl Into<String>, remaining: usize) -> Self {
        let p = path.into();
        Self {
            code: ReconcileErrorCode::AeroJoinInconsistent,
            message: format!(
                "Matched set for '{}' is not a subset of referenced identifiers ({} left over)",
                p, remaining
            ),
            path: p,
        }
    }

    /// Side-channel key absent from a document that survived filtering
    pub fn missing_join_data(path: impl Into<String>, join_key: &str) -> Self {
        let p = path.into();
        Self {
            code: ReconcileErrorCode::AeroJoinInconsistent,
            message: format!("Result document lacks join data '{}'", join_key),
            path: p,
        }
    }

    /// Document or field shaped contrary to the engine contract
    pub fn malformed_document(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let p = path.into();
        Self {
            code: ReconcileErrorCode::AeroJoinMalformedDocument,
            message: format!("Malformed result document at '{}': {}", p, reason.into()),
            path: p,
        }
    }

    /// Matched record rejected by the document constructor
    pub fn hydration_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let p = path.into();
        Self {
            code: ReconcileErrorCode::AeroJoinHydrationFailed,
            message: format!("Failed to hydrate match for '{}': {}", p, reason.into()),
            path: p,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ReconcileErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the reference field path being reconciled
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for ReconcileError {}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
