//! In-memory schema registry with optional directory loading
//!
//! Schemas are registered programmatically or loaded from a directory of
//! `*.json` files, one collection schema per file. A malformed schema file
//! is fatal at load time; a registered schema is immutable afterwards.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::observability::{Logger, LookupEvent};

use super::errors::{SchemaError, SchemaResult};
use super::resolver::{ReferenceCardinality, ResolvedReference, SchemaResolver};
use super::types::{CollectionSchema, FieldType};

/// Registry of collection schemas, keyed by collection name.
pub struct SchemaRegistry {
    schemas: HashMap<String, CollectionSchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Registers a schema directly.
    ///
    /// Fails when the schema is structurally invalid or when a schema for
    /// the same collection was already registered.
    pub fn register(&mut self, schema: CollectionSchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|reason| SchemaError::malformed_schema("<in-memory>", reason))?;

        if self.schemas.contains_key(&schema.collection) {
            return Err(SchemaError::duplicate_schema(&schema.collection));
        }

        self.schemas.insert(schema.collection.clone(), schema);
        Ok(())
    }

    /// Loads every `*.json` schema file from a directory.
    ///
    /// Non-JSON files are skipped. Returns the number of schemas loaded.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed_schema(
                dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut loaded = 0;
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            self.load_schema_file(&path)?;
            loaded += 1;
        }

        Logger::info(
            LookupEvent::SchemasLoaded.as_str(),
            &[("count", &loaded.to_string())],
        );
        Ok(loaded)
    }

    /// Loads a single schema file.
    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let schema: CollectionSchema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|reason| SchemaError::malformed_schema(path.display().to_string(), reason))?;

        if self.schemas.contains_key(&schema.collection) {
            return Err(SchemaError::duplicate_schema(&schema.collection));
        }
        self.schemas.insert(schema.collection.clone(), schema);
        Ok(())
    }

    /// Returns the schema for a collection, if registered.
    pub fn get(&self, collection: &str) -> Option<&CollectionSchema> {
        self.schemas.get(collection)
    }

    /// Checks whether a collection has a registered schema.
    pub fn contains(&self, collection: &str) -> bool {
        self.schemas.contains_key(collection)
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true when no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaResolver for SchemaRegistry {
    fn resolve_reference(&self, collection: &str, path: &str) -> SchemaResult<ResolvedReference> {
        let schema = self
            .get(collection)
            .ok_or_else(|| SchemaError::unknown_collection(collection))?;

        let def = schema
            .field(path)
            .ok_or_else(|| SchemaError::unknown_relation(collection, path))?;

        match &def.field_type {
            FieldType::Reference { target } => Ok(ResolvedReference {
                cardinality: ReferenceCardinality::Singular,
                target_collection: target.clone(),
            }),
            FieldType::ReferenceList { target } => Ok(ResolvedReference {
                cardinality: ReferenceCardinality::Many,
                target_collection: target.clone(),
            }),
            _ => Err(SchemaError::not_a_reference(collection, path)),
        }
    }
}
