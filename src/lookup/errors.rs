//! Unified lookup error
//!
//! A lookup either produces the complete reconciled sequence or fails as a
//! whole with the first error from whichever phase broke. Nothing is
//! retried here.

use thiserror::Error;

use crate::compiler::CompileError;
use crate::executor::ExecutorError;
use crate::expr::ExpressionError;
use crate::reconcile::ReconcileError;

/// Result type for lookups
pub type LookupResult<T> = Result<T, LookupError>;

/// Any failure a lookup can surface
#[derive(Debug, Error)]
pub enum LookupError {
    /// Expression parsing or validation failed
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    /// Pipeline compilation failed
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Engine execution failed; passed through unmodified
    #[error(transparent)]
    Execute(#[from] ExecutorError),

    /// Reconciliation found an engine or compiler contract violation
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

impl LookupError {
    /// Returns the string code of the underlying error
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::Expression(e) => e.code().code(),
            LookupError::Compile(e) => e.code(),
            LookupError::Execute(e) => e.code(),
            LookupError::Reconcile(e) => e.code().code(),
        }
    }
}
