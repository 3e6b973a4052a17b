//! Expression error types
//!
//! Error codes:
//! - AERO_EXPR_INVALID (REJECT)
//! - AERO_EXPR_CONFLICTING_COMBINATORS (REJECT)
//! - AERO_EXPR_BAD_CONDITION (REJECT)
//! - AERO_EXPR_BAD_REGEX (REJECT)

use std::fmt;

/// Expression-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionErrorCode {
    /// Malformed expression structure
    AeroExprInvalid,
    /// Node declares both AND and OR
    AeroExprConflictingCombinators,
    /// Malformed condition object
    AeroExprBadCondition,
    /// Invalid regular expression in a `matches` clause
    AeroExprBadRegex,
}

impl ExpressionErrorCode {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ExpressionErrorCode::AeroExprInvalid => "AERO_EXPR_INVALID",
            ExpressionErrorCode::AeroExprConflictingCombinators => {
                "AERO_EXPR_CONFLICTING_COMBINATORS"
            }
            ExpressionErrorCode::AeroExprBadCondition => "AERO_EXPR_BAD_CONDITION",
            ExpressionErrorCode::AeroExprBadRegex => "AERO_EXPR_BAD_REGEX",
        }
    }
}

impl fmt::Display for ExpressionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Expression error type
#[derive(Debug, Clone)]
pub struct ExpressionError {
    /// Error code
    code: ExpressionErrorCode,
    /// Human-readable message
    message: String,
}

impl ExpressionError {
    /// Create an invalid expression error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            code: ExpressionErrorCode::AeroExprInvalid,
            message: reason.into(),
        }
    }

    /// Create a conflicting combinators error
    pub fn conflicting_combinators() -> Self {
        Self {
            code: ExpressionErrorCode::AeroExprConflictingCombinators,
            message: "Cannot combine AND and OR on the same node".into(),
        }
    }

    /// Create a bad condition error
    pub fn bad_condition(reason: impl Into<String>) -> Self {
        Self {
            code: ExpressionErrorCode::AeroExprBadCondition,
            message: reason.into(),
        }
    }

    /// Create a bad regex error
    pub fn bad_regex(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: ExpressionErrorCode::AeroExprBadRegex,
            message: format!("Invalid pattern '{}': {}", pattern.into(), reason.into()),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExpressionErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for ExpressionError {}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ExpressionErrorCode::AeroExprInvalid.code(), "AERO_EXPR_INVALID");
        assert_eq!(
            ExpressionErrorCode::AeroExprConflictingCombinators.code(),
            "AERO_EXPR_CONFLICTING_COMBINATORS"
        );
    }

    #[test]
    fn test_display_carries_code() {
        let err = ExpressionError::conflicting_combinators();
        let display = format!("{}", err);
        assert!(display.contains("AERO_EXPR_CONFLICTING_COMBINATORS"));
        assert!(display.contains("AND and OR"));
    }
}
