//! Compiler error types
//!
//! Compilation fails before anything touches the store: unsupported
//! combinators and modifiers are rejected here, and schema resolution
//! failures surface through the `Schema` variant.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors produced while compiling an expression tree
#[derive(Debug, Error)]
pub enum CompileError {
    /// Combinator declared but not implemented in this version
    #[error("Unsupported combinator: {0}")]
    UnsupportedCombinator(&'static str),

    /// Modifier declared but not implemented in this version
    #[error("Unsupported modifier: {0}")]
    UnsupportedModifier(&'static str),

    /// Leaf path failed schema resolution
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl CompileError {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::UnsupportedCombinator(_) => "AERO_JOIN_UNSUPPORTED_COMBINATOR",
            CompileError::UnsupportedModifier(_) => "AERO_JOIN_UNSUPPORTED_MODIFIER",
            CompileError::Schema(e) => e.code().code(),
        }
    }
}
