//! Reconciliation subsystem for aerojoin
//!
//! Rebuilds each result document after execution: side-channel match arrays
//! are consumed, matched related documents are hydrated and embedded in
//! place of their raw identifiers, and join artifacts are removed.
//!
//! # Design Principles
//!
//! - Reference fields keep their original cardinality and order exactly
//! - Unmatched identifiers stay raw; they are never dropped or invented
//! - Reconciliation is pure per document; no shared state across documents
//! - Any disagreement with the engine's contract is fatal, never repaired

mod errors;
mod reconciler;

pub use errors::{ReconcileError, ReconcileErrorCode, ReconcileResult, Severity};
pub use reconciler::Reconciler;
