//! Execution engine boundary
//!
//! The lookup layer issues exactly one `execute` call per request; it is
//! the only suspension point in a lookup. Everything before it is pure
//! compilation, everything after it is pure per-document reconciliation.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::compiler::Stage;

use super::errors::ExecutorResult;

/// Runs a compiled stage sequence against a document store.
///
/// Contract: the returned documents keep all their original field values,
/// including unmodified reference fields, alongside every side-channel
/// array a join stage attached. Result order must be deterministic for an
/// unchanged store. Cancellation and timeout policy live behind this trait;
/// the lookup layer has none of its own.
pub trait ExecutionEngine: Send + Sync {
    /// Execute the stage sequence over the host collection.
    fn execute<'a>(
        &'a self,
        host_collection: &'a str,
        stages: &'a [Stage],
    ) -> Pin<Box<dyn Future<Output = ExecutorResult<Vec<Value>>> + Send + 'a>>;
}
