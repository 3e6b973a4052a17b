//! Reference execution engine over the in-memory store
//!
//! Stage semantics:
//! - Join: for each host document, select target-collection documents that
//!   pass the stage filter and whose identifier equals (singular) or is a
//!   member of (multi-valued) the host's reference field value; attach the
//!   selected set under the stage's side-channel key, in target insertion
//!   order.
//! - RequireNonEmpty: drop host documents whose side-channel array is
//!   empty.
//!
//! A host field that is absent or mistyped yields no matches rather than
//! an error; the filter stage then removes the document.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::compiler::{JoinStage, MatchMode, Stage};
use crate::document::doc_id;
use crate::store::{Collection, MemoryStore};

use super::engine::ExecutionEngine;
use super::errors::{ExecutorError, ExecutorResult};
use super::filters::ConditionFilter;

/// In-process engine executing stage sequences over a `MemoryStore`.
pub struct MemoryEngine {
    store: Arc<MemoryStore>,
}

impl MemoryEngine {
    /// Creates an engine over a shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Synchronous core of `execute`.
    fn run(&self, host_collection: &str, stages: &[Stage]) -> ExecutorResult<Vec<Value>> {
        let host = self
            .store
            .collection(host_collection)
            .ok_or_else(|| ExecutorError::UnknownCollection(host_collection.to_string()))?;

        let mut documents: Vec<Value> = host.documents().to_vec();

        for stage in stages {
            match stage {
                Stage::Join(join) => {
                    let target = self.store.collection(&join.target_collection).ok_or_else(
                        || ExecutorError::UnknownCollection(join.target_collection.clone()),
                    )?;

                    for document in &mut documents {
                        let matched = Self::join_matches(document, join, target);
                        let obj = document.as_object_mut().ok_or_else(|| {
                            ExecutorError::MalformedDocument {
                                collection: host_collection.to_string(),
                                reason: "document is not an object".to_string(),
                            }
                        })?;
                        obj.insert(join.as_key.clone(), Value::Array(matched));
                    }
                }
                Stage::RequireNonEmpty { field } => {
                    documents.retain(|document| {
                        document
                            .get(field)
                            .and_then(Value::as_array)
                            .map_or(false, |items| !items.is_empty())
                    });
                }
            }
        }

        Ok(documents)
    }

    /// Selects the target documents matched by one join stage for one host
    /// document, in target insertion order.
    fn join_matches(host_document: &Value, join: &JoinStage, target: &Collection) -> Vec<Value> {
        let host_value = host_document.get(&join.host_field);

        match join.match_mode {
            MatchMode::Equals => {
                let host_id = match host_value.and_then(Value::as_str) {
                    Some(id) => id,
                    None => return Vec::new(),
                };
                target
                    .documents()
                    .iter()
                    .filter(|candidate| {
                        doc_id(candidate) == Some(host_id)
                            && ConditionFilter::matches(candidate, &join.filter)
                    })
                    .cloned()
                    .collect()
            }
            MatchMode::ContainedIn => {
                let ids: HashSet<&str> = match host_value.and_then(Value::as_array) {
                    Some(entries) => entries.iter().filter_map(Value::as_str).collect(),
                    None => return Vec::new(),
                };
                if ids.is_empty() {
                    return Vec::new();
                }
                target
                    .documents()
                    .iter()
                    .filter(|candidate| {
                        doc_id(candidate).map_or(false, |id| ids.contains(id))
                            && ConditionFilter::matches(candidate, &join.filter)
                    })
                    .cloned()
                    .collect()
            }
        }
    }
}

impl ExecutionEngine for MemoryEngine {
    fn execute<'a>(
        &'a self,
        host_collection: &'a str,
        stages: &'a [Stage],
    ) -> Pin<Box<dyn Future<Output = ExecutorResult<Vec<Value>>> + Send + 'a>> {
        Box::pin(async move { self.run(host_collection, stages) })
    }
}
