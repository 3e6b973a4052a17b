//! Lookup aggregator subsystem for aerojoin
//!
//! The public surface of the crate: one `lookup` operation over a host
//! collection, accepting the predicate/combinator grammar and returning
//! fully reconciled documents.
//!
//! # Design Principles
//!
//! - All-or-nothing: a lookup returns the complete reconciled sequence or
//!   fails as a whole; no partial results
//! - Exactly one engine call per lookup
//! - Reconciliation is a synchronous fold per document, in compiled order
//! - Collaborators are injected; the client holds no per-request state

mod client;
mod errors;

pub use client::LookupClient;
pub use errors::{LookupError, LookupResult};
