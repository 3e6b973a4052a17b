//! Schema validator for document bodies
//!
//! Validation semantics:
//! - `_id` is present and a string
//! - All required fields are present
//! - No undeclared fields exist (store-managed metadata excepted)
//! - Field types exactly match schema types; no coercion, no nulls
//! - Reference fields hold string identifiers; reference lists hold arrays
//!   of string identifiers

use serde_json::Value;

use crate::document::ID_FIELD;

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{CollectionSchema, FieldType};

/// Fields the store manages itself; always permitted, never declared.
const MANAGED_FIELDS: [&str; 3] = [ID_FIELD, "created_at", "updated_at"];

/// Stateless validator enforcing a collection schema on documents.
///
/// The validator never mutates documents and is deterministic.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validates a document body against a collection schema.
    pub fn validate(schema: &CollectionSchema, document: &Value) -> SchemaResult<()> {
        let obj = document.as_object().ok_or_else(|| {
            SchemaError::validation_failed(
                &schema.collection,
                ValidationDetails::type_mismatch("$root", "object", json_type_name(document)),
            )
        })?;

        if obj.get(ID_FIELD).map(Value::is_string) != Some(true) {
            return Err(SchemaError::validation_failed(
                &schema.collection,
                ValidationDetails::missing_field(ID_FIELD),
            ));
        }

        // No undeclared fields
        for key in obj.keys() {
            if !schema.fields.contains_key(key) && !MANAGED_FIELDS.contains(&key.as_str()) {
                return Err(SchemaError::validation_failed(
                    &schema.collection,
                    ValidationDetails::extra_field(key),
                ));
            }
        }

        for (name, def) in &schema.fields {
            match obj.get(name) {
                None => {
                    if def.required {
                        return Err(SchemaError::validation_failed(
                            &schema.collection,
                            ValidationDetails::missing_field(name),
                        ));
                    }
                }
                Some(Value::Null) => {
                    return Err(SchemaError::validation_failed(
                        &schema.collection,
                        ValidationDetails::null_value(name),
                    ));
                }
                Some(value) => {
                    Self::validate_field(&schema.collection, name, &def.field_type, value)?;
                }
            }
        }

        Ok(())
    }

    /// Validates one field value against its declared type.
    fn validate_field(
        collection: &str,
        name: &str,
        field_type: &FieldType,
        value: &Value,
    ) -> SchemaResult<()> {
        let ok = match field_type {
            FieldType::String => value.is_string(),
            FieldType::Int => value.as_i64().is_some() || value.as_u64().is_some(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Float => value.is_number(),
            FieldType::Reference { .. } => value.is_string(),
            FieldType::ReferenceList { .. } => value
                .as_array()
                .map(|items| items.iter().all(Value::is_string))
                .unwrap_or(false),
        };

        if !ok {
            return Err(SchemaError::validation_failed(
                collection,
                ValidationDetails::type_mismatch(name, field_type.type_name(), json_type_name(value)),
            ));
        }
        Ok(())
    }
}

/// Returns a JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
