//! Document constructors for embedded sub-documents
//!
//! When reconciliation splices a matched related document into a host
//! document's reference field, the raw record is first passed through a
//! `DocumentConstructor` so that embedded sub-documents are real entities of
//! the target collection, not loose JSON.

use std::sync::Arc;

use serde_json::Value;

use crate::schema::{
    SchemaError, SchemaRegistry, SchemaResult, SchemaValidator, ValidationDetails,
};

use super::document::ID_FIELD;

/// Produces a hydrated instance of a target collection's entity from a raw
/// matched record.
///
/// Injected into the compiler and bound into each reconciler; implementations
/// must be shareable across concurrent lookups.
pub trait DocumentConstructor: Send + Sync {
    /// Hydrate a raw matched record for the given target collection.
    fn construct(&self, collection: &str, raw: Value) -> SchemaResult<Value>;
}

/// Pass-through constructor.
///
/// Accepts any object that carries a string identifier. This is the default
/// when no schemas are bound to the lookup client.
pub struct RawConstructor;

impl DocumentConstructor for RawConstructor {
    fn construct(&self, collection: &str, raw: Value) -> SchemaResult<Value> {
        let valid = raw
            .get(ID_FIELD)
            .map(Value::is_string)
            .unwrap_or(false);
        if !valid {
            return Err(SchemaError::validation_failed(
                collection,
                ValidationDetails::missing_field(ID_FIELD),
            ));
        }
        Ok(raw)
    }
}

/// Schema-bound constructor.
///
/// Validates every raw matched record against the target collection's
/// registered schema before it is embedded.
pub struct SchemaConstructor {
    registry: Arc<SchemaRegistry>,
}

impl SchemaConstructor {
    /// Creates a constructor backed by the given registry.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }
}

impl DocumentConstructor for SchemaConstructor {
    fn construct(&self, collection: &str, raw: Value) -> SchemaResult<Value> {
        let schema = self
            .registry
            .get(collection)
            .ok_or_else(|| SchemaError::unknown_collection(collection))?;
        SchemaValidator::validate(schema, &raw)?;
        Ok(raw)
    }
}
