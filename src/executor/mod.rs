//! Execution Engine subsystem for aerojoin
//!
//! The engine runs a compiled stage sequence against the store and returns
//! raw host documents, each carrying its original fields plus one
//! side-channel array per join stage. The lookup layer consumes engines
//! through the `ExecutionEngine` trait; `MemoryEngine` is the in-process
//! reference implementation.
//!
//! # Design Principles
//!
//! - One engine call per lookup; the engine sees the whole pipeline
//! - Deterministic results for an unchanged store
//! - Original field values survive execution untouched
//! - Strict condition evaluation: no coercion, missing/null never match

mod engine;
mod errors;
mod filters;
mod memory;

pub use engine::ExecutionEngine;
pub use errors::{ExecutorError, ExecutorResult};
pub use filters::ConditionFilter;
pub use memory::MemoryEngine;
