//! Splices matched related documents back into reference fields
//!
//! The execution engine returns each surviving host document with a
//! side-channel array of matched related documents per compiled leaf. A
//! `Reconciler` is bound to one leaf: it consumes that array, embeds
//! hydrated sub-documents into the reference field, and removes the
//! side-channel key.
//!
//! The reference field keeps its original cardinality and order exactly.
//! For multi-valued fields, every identifier is walked in order against an
//! owned buffer of matches; a matched position becomes an embedded
//! document, an unmatched identifier stays raw (the store correctly elides
//! documents that no longer exist). A non-empty buffer after the walk means
//! the engine returned documents the host never referenced, which is a
//! contract violation.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::document::{doc_id, DocumentConstructor};
use crate::schema::ReferenceCardinality;

use super::errors::{ReconcileError, ReconcileResult};

/// Per-leaf reconciliation, bound at compile time.
pub struct Reconciler {
    path: String,
    join_key: String,
    cardinality: ReferenceCardinality,
    target_collection: String,
    constructor: Arc<dyn DocumentConstructor>,
}

impl fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("path", &self.path)
            .field("join_key", &self.join_key)
            .field("cardinality", &self.cardinality.as_str())
            .field("target_collection", &self.target_collection)
            .finish()
    }
}

impl Reconciler {
    /// Binds a reconciler to one compiled leaf.
    pub fn new(
        path: impl Into<String>,
        join_key: impl Into<String>,
        cardinality: ReferenceCardinality,
        target_collection: impl Into<String>,
        constructor: Arc<dyn DocumentConstructor>,
    ) -> Self {
        Self {
            path: path.into(),
            join_key: join_key.into(),
            cardinality,
            target_collection: target_collection.into(),
            constructor,
        }
    }

    /// Returns the reference field path this reconciler rewrites.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the side-channel key this reconciler consumes.
    pub fn join_key(&self) -> &str {
        &self.join_key
    }

    /// Reconciles one result document.
    ///
    /// `None` in yields `None` out, so a chain of reconcilers
    /// short-circuits once a prior step dropped the document.
    pub fn apply(&self, document: Option<Value>) -> ReconcileResult<Option<Value>> {
        let mut document = match document {
            Some(document) => document,
            None => return Ok(None),
        };

        let obj = document.as_object_mut().ok_or_else(|| {
            ReconcileError::malformed_document(&self.path, "document is not an object")
        })?;

        // The side-channel key never survives, success or not
        let matched = obj.remove(&self.join_key);
        let matched = match matched {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ReconcileError::malformed_document(
                    &self.path,
                    format!("join data '{}' is not an array", self.join_key),
                ))
            }
            None => return Err(ReconcileError::missing_join_data(&self.path, &self.join_key)),
        };

        let reference = obj.get(&self.path).cloned().ok_or_else(|| {
            ReconcileError::malformed_document(
                &self.path,
                "reference field missing from result document",
            )
        })?;

        let embedded = match self.cardinality {
            ReferenceCardinality::Singular => self.reconcile_singular(&reference, matched)?,
            ReferenceCardinality::Many => self.reconcile_many(&reference, matched)?,
        };
        obj.insert(self.path.clone(), embedded);

        Ok(Some(document))
    }

    /// Singular case: exactly one match whose id equals the raw reference.
    fn reconcile_singular(
        &self,
        reference: &Value,
        mut matched: Vec<Value>,
    ) -> ReconcileResult<Value> {
        let raw_id = reference.as_str().ok_or_else(|| {
            ReconcileError::malformed_document(&self.path, "singular reference is not a string id")
        })?;

        if matched.len() != 1 {
            return Err(ReconcileError::singular_cardinality(
                &self.path,
                matched.len(),
            ));
        }
        let item = matched.remove(0);

        let item_id = doc_id(&item).ok_or_else(|| {
            ReconcileError::malformed_document(&self.path, "matched document lacks a string id")
        })?;
        if item_id != raw_id {
            return Err(ReconcileError::singular_mismatch(&self.path, raw_id, item_id));
        }

        self.hydrate(item)
    }

    /// Multi-valued case: walk identifiers in order over an owned buffer of
    /// matches, consuming each match as it is placed.
    fn reconcile_many(
        &self,
        reference: &Value,
        mut matched: Vec<Value>,
    ) -> ReconcileResult<Value> {
        let ids = reference.as_array().ok_or_else(|| {
            ReconcileError::malformed_document(
                &self.path,
                "multi-valued reference is not an array",
            )
        })?;

        let mut rebuilt = Vec::with_capacity(ids.len());
        for entry in ids {
            let id = entry.as_str().ok_or_else(|| {
                ReconcileError::malformed_document(
                    &self.path,
                    "reference entry is not a string id",
                )
            })?;

            match matched.iter().position(|m| doc_id(m) == Some(id)) {
                Some(index) => {
                    let item = matched.remove(index);
                    rebuilt.push(self.hydrate(item)?);
                }
                // Dangling identifier: the target document no longer exists
                None => rebuilt.push(entry.clone()),
            }
        }

        if !matched.is_empty() {
            return Err(ReconcileError::unconsumed_matches(&self.path, matched.len()));
        }

        Ok(Value::Array(rebuilt))
    }

    /// Runs a matched record through the bound document constructor.
    fn hydrate(&self, item: Value) -> ReconcileResult<Value> {
        self.constructor
            .construct(&self.target_collection, item)
            .map_err(|e| ReconcileError::hydration_failed(&self.path, e.to_string()))
    }
}
