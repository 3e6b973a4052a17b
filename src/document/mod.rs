//! Document identity and hydration for aerojoin
//!
//! Documents are JSON objects carrying a string `_id`. The lookup layer never
//! mutates a stored document; reconciliation works on owned copies returned
//! by the execution engine.
//!
//! # Design Principles
//!
//! - Every document is identified by a string `_id`
//! - Hydration of embedded sub-documents goes through an injected
//!   `DocumentConstructor`, never an ambient registry
//! - Constructors validate, they do not repair

mod constructor;
mod document;

pub use constructor::{DocumentConstructor, RawConstructor, SchemaConstructor};
pub use document::{doc_id, ID_FIELD};
