//! Schema error types
//!
//! Error codes:
//! - AERO_UNKNOWN_COLLECTION (REJECT)
//! - AERO_UNKNOWN_RELATION (REJECT)
//! - AERO_NOT_A_REFERENCE (REJECT)
//! - AERO_SCHEMA_VALIDATION_FAILED (REJECT)
//! - AERO_DUPLICATE_SCHEMA (REJECT)
//! - AERO_MALFORMED_SCHEMA (FATAL)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller request rejected
    Reject,
    /// Registry cannot be trusted, startup must fail
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Collection has no registered schema
    AeroUnknownCollection,
    /// Field path does not exist on the collection
    AeroUnknownRelation,
    /// Field exists but is not a reference field
    AeroNotAReference,
    /// Document violates the collection schema
    AeroSchemaValidationFailed,
    /// Attempt to re-register a collection schema
    AeroDuplicateSchema,
    /// Schema file unreadable or structurally invalid (FATAL)
    AeroMalformedSchema,
}

impl SchemaErrorCode {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::AeroUnknownCollection => "AERO_UNKNOWN_COLLECTION",
            SchemaErrorCode::AeroUnknownRelation => "AERO_UNKNOWN_RELATION",
            SchemaErrorCode::AeroNotAReference => "AERO_NOT_A_REFERENCE",
            SchemaErrorCode::AeroSchemaValidationFailed => "AERO_SCHEMA_VALIDATION_FAILED",
            SchemaErrorCode::AeroDuplicateSchema => "AERO_DUPLICATE_SCHEMA",
            SchemaErrorCode::AeroMalformedSchema => "AERO_MALFORMED_SCHEMA",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::AeroMalformedSchema => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone)]
pub struct ValidationDetails {
    /// Field path within the document
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "field to be present".into(),
            actual: "missing".into(),
        }
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "no undeclared fields".into(),
            actual: "extra field present".into(),
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "non-null value".into(),
            actual: "null".into(),
        }
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// Collection name if applicable
    collection: Option<String>,
    /// Field path if applicable
    field: Option<String>,
}

impl SchemaError {
    /// Create an unknown collection error
    pub fn unknown_collection(collection: impl Into<String>) -> Self {
        let c = collection.into();
        Self {
            code: SchemaErrorCode::AeroUnknownCollection,
            message: format!("Collection '{}' has no registered schema", c),
            collection: Some(c),
            field: None,
        }
    }

    /// Create an unknown relation error
    pub fn unknown_relation(collection: impl Into<String>, field: impl Into<String>) -> Self {
        let c = collection.into();
        let f = field.into();
        Self {
            code: SchemaErrorCode::AeroUnknownRelation,
            message: format!("Collection '{}' declares no field '{}'", c, f),
            collection: Some(c),
            field: Some(f),
        }
    }

    /// Create a not-a-reference error
    pub fn not_a_reference(collection: impl Into<String>, field: impl Into<String>) -> Self {
        let c = collection.into();
        let f = field.into();
        Self {
            code: SchemaErrorCode::AeroNotAReference,
            message: format!("Field '{}' on collection '{}' is not a reference field", f, c),
            collection: Some(c),
            field: Some(f),
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(collection: impl Into<String>, details: ValidationDetails) -> Self {
        let c = collection.into();
        Self {
            code: SchemaErrorCode::AeroSchemaValidationFailed,
            message: format!("Document validation failed for '{}': {}", c, details),
            collection: Some(c),
            field: Some(details.field),
        }
    }

    /// Create a duplicate schema error
    pub fn duplicate_schema(collection: impl Into<String>) -> Self {
        let c = collection.into();
        Self {
            code: SchemaErrorCode::AeroDuplicateSchema,
            message: format!("Schema for collection '{}' is already registered", c),
            collection: Some(c),
            field: None,
        }
    }

    /// Create an error for a malformed schema file (FATAL)
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::AeroMalformedSchema,
            message: format!("Malformed schema '{}': {}", path.into(), reason.into()),
            collection: None,
            field: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
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

    /// Returns the collection name if applicable
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// Returns the field path if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for SchemaError {
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

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SchemaErrorCode::AeroUnknownCollection.code(),
            "AERO_UNKNOWN_COLLECTION"
        );
        assert_eq!(
            SchemaErrorCode::AeroUnknownRelation.code(),
            "AERO_UNKNOWN_RELATION"
        );
        assert_eq!(
            SchemaErrorCode::AeroNotAReference.code(),
            "AERO_NOT_A_REFERENCE"
        );
        assert_eq!(
            SchemaErrorCode::AeroSchemaValidationFailed.code(),
            "AERO_SCHEMA_VALIDATION_FAILED"
        );
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(
            SchemaErrorCode::AeroUnknownRelation.severity(),
            Severity::Reject
        );
        assert_eq!(
            SchemaErrorCode::AeroMalformedSchema.severity(),
            Severity::Fatal
        );
    }

    #[test]
    fn test_error_display_carries_code() {
        let err = SchemaError::unknown_relation("posts", "writer");
        let display = format!("{}", err);
        assert!(display.contains("AERO_UNKNOWN_RELATION"));
        assert!(display.contains("writer"));
    }

    #[test]
    fn test_validation_details_display() {
        let details = ValidationDetails::type_mismatch("author", "reference id", "int");
        let display = format!("{}", details);
        assert!(display.contains("author"));
        assert!(display.contains("reference id"));
    }
}
