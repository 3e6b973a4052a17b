//! Schema subsystem for aerojoin
//!
//! Collection schemas declare which fields are references and where they
//! point. The compiler consumes this subsystem through the `SchemaResolver`
//! seam; the schema-bound document constructor consumes it through the
//! validator.
//!
//! # Design Principles
//!
//! - Reference cardinality and target collection are immutable schema facts
//! - Resolved metadata is read-only and shareable across concurrent lookups
//! - Validation is deterministic: no coercion, no defaults, no nulls
//! - Registered schemas are immutable; malformed schema files are fatal

mod errors;
mod registry;
mod resolver;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity, ValidationDetails};
pub use registry::SchemaRegistry;
pub use resolver::{ReferenceCardinality, ResolvedReference, SchemaResolver};
pub use types::{CollectionSchema, FieldDef, FieldType};
pub use validator::SchemaValidator;
