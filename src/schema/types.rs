//! Schema type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - bool: Boolean
//! - float: 64-bit floating point
//! - reference: a single identifier pointing into a target collection
//! - reference_list: an ordered sequence of identifiers pointing into a
//!   target collection
//!
//! Reference cardinality and target collection are immutable schema facts;
//! the lookup compiler resolves them once per field path.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// Boolean
    Bool,
    /// 64-bit floating point
    Float,
    /// Single identifier referencing one document in `target`
    Reference {
        /// Target collection name
        target: String,
    },
    /// Ordered identifiers referencing documents in `target`
    ReferenceList {
        /// Target collection name
        target: String,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Float => "float",
            FieldType::Reference { .. } => "reference",
            FieldType::ReferenceList { .. } => "reference_list",
        }
    }

    /// Returns true for reference and reference_list fields
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            FieldType::Reference { .. } | FieldType::ReferenceList { .. }
        )
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether field must be present
    pub required: bool,
}

impl FieldDef {
    /// Create a required string field
    pub fn required_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: true,
        }
    }

    /// Create an optional string field
    pub fn optional_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
        }
    }

    /// Create a required int field
    pub fn required_int() -> Self {
        Self {
            field_type: FieldType::Int,
            required: true,
        }
    }

    /// Create an optional int field
    pub fn optional_int() -> Self {
        Self {
            field_type: FieldType::Int,
            required: false,
        }
    }

    /// Create a required bool field
    pub fn required_bool() -> Self {
        Self {
            field_type: FieldType::Bool,
            required: true,
        }
    }

    /// Create a required float field
    pub fn required_float() -> Self {
        Self {
            field_type: FieldType::Float,
            required: true,
        }
    }

    /// Create a required singular reference field
    pub fn reference(target: impl Into<String>) -> Self {
        Self {
            field_type: FieldType::Reference {
                target: target.into(),
            },
            required: true,
        }
    }

    /// Create an optional singular reference field
    pub fn optional_reference(target: impl Into<String>) -> Self {
        Self {
            field_type: FieldType::Reference {
                target: target.into(),
            },
            required: false,
        }
    }

    /// Create a required multi-valued reference field
    pub fn reference_list(target: impl Into<String>) -> Self {
        Self {
            field_type: FieldType::ReferenceList {
                target: target.into(),
            },
            required: true,
        }
    }

    /// Create an optional multi-valued reference field
    pub fn optional_reference_list(target: impl Into<String>) -> Self {
        Self {
            field_type: FieldType::ReferenceList {
                target: target.into(),
            },
            required: false,
        }
    }
}

/// Complete schema for one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Collection name
    pub collection: String,
    /// Declared fields
    pub fields: HashMap<String, FieldDef>,
}

impl CollectionSchema {
    /// Creates a new collection schema
    pub fn new(collection: impl Into<String>, fields: HashMap<String, FieldDef>) -> Self {
        Self {
            collection: collection.into(),
            fields,
        }
    }

    /// Returns the definition for a field, if declared
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Checks structural validity of the schema itself.
    ///
    /// Returns a human-readable reason on failure; the registry wraps it
    /// into a fatal malformed-schema error.
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.collection.is_empty() {
            return Err("collection name must not be empty".into());
        }
        for (name, def) in &self.fields {
            if name.is_empty() {
                return Err("field names must not be empty".into());
            }
            match &def.field_type {
                FieldType::Reference { target } | FieldType::ReferenceList { target } => {
                    if target.is_empty() {
                        return Err(format!(
                            "reference field '{}' must name a target collection",
                            name
                        ));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}
