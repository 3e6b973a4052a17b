//! aerojoin - a strict, deterministic relational-join lookup layer for
//! document collections
//!
//! Given a host collection whose documents reference other collections by
//! identifier, aerojoin compiles a boolean filter tree over the *related*
//! collections into a join/filter stage sequence, executes it through a
//! single execution-engine call, and splices the matched related documents
//! back into the host documents' reference fields, preserving the original
//! order and cardinality of every reference.

pub mod compiler;
pub mod document;
pub mod executor;
pub mod expr;
pub mod lookup;
pub mod observability;
pub mod reconcile;
pub mod schema;
pub mod store;
