//! Pipeline Compiler subsystem for aerojoin
//!
//! Compiles a canonical expression tree into a flat stage sequence plus a
//! matching list of reconcilers. One compilation, one engine call: all
//! predicates land in a single pipeline, so a lookup never issues N+1
//! queries.
//!
//! # Design Principles
//!
//! - Deterministic: same expression, same schemas, same pipeline
//! - Each leaf is exactly one join stage plus one filter stage
//! - AND is composition; each join+filter pair narrows the host set
//! - OR and `every` are declared but rejected until implemented
//! - Schema facts arrive through the injected resolver, never globals

mod compiler;
mod errors;
mod explain;
mod stage;

pub use compiler::{join_key, CompiledPipeline, PipelineCompiler};
pub use errors::{CompileError, CompileResult};
pub use explain::ExplainPipeline;
pub use stage::{JoinStage, MatchMode, Stage};
