//! Reference resolution seam consumed by the pipeline compiler
//!
//! The compiler needs exactly two facts about a field path: whether the
//! reference is singular or multi-valued, and which collection it points
//! into. Both are immutable schema facts, so resolved metadata is read-only
//! and safe to share across concurrent lookups.

use super::errors::SchemaResult;

/// Cardinality of a reference field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceCardinality {
    /// Field holds exactly one identifier
    Singular,
    /// Field holds an ordered sequence of identifiers
    Many,
}

impl ReferenceCardinality {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceCardinality::Singular => "singular",
            ReferenceCardinality::Many => "many",
        }
    }
}

/// Resolved metadata for one reference field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// Singular or multi-valued
    pub cardinality: ReferenceCardinality,
    /// Collection the field points into
    pub target_collection: String,
}

/// Read-only schema resolution interface.
///
/// Injected into the compiler explicitly; there is no ambient registry.
pub trait SchemaResolver: Send + Sync {
    /// Resolves a reference field on the given collection.
    ///
    /// Fails when the collection is unknown, the field is undeclared, or the
    /// field is not a reference field.
    fn resolve_reference(&self, collection: &str, path: &str) -> SchemaResult<ResolvedReference>;
}
