//! Expression-to-pipeline compiler
//!
//! Walks a canonical expression tree and emits, per leaf, a join stage and
//! a filter stage plus a bound reconciler. AND children compile against the
//! same host collection and concatenate left to right; each additional
//! join+filter pair narrows the surviving host set, so conjunction falls
//! out of composition with no extra plumbing.

use std::sync::Arc;

use crate::document::DocumentConstructor;
use crate::expr::{Expression, MatchModifier, Predicate};
use crate::reconcile::Reconciler;
use crate::schema::{ReferenceCardinality, SchemaResolver};

use super::errors::{CompileError, CompileResult};
use super::stage::{JoinStage, MatchMode, Stage};

/// Suffix appended to a leaf's path to form its side-channel key.
const JOIN_KEY_SUFFIX: &str = "__matched";

/// Derives the side-channel key for a leaf path.
///
/// Deterministic, so repeated compilations of the same expression produce
/// identical pipelines.
pub fn join_key(path: &str) -> String {
    format!("{}{}", path, JOIN_KEY_SUFFIX)
}

/// A fully compiled pipeline: stages for the engine, reconcilers for the
/// result documents, in matching order.
#[derive(Debug)]
pub struct CompiledPipeline {
    /// Stage sequence, executed in order by the engine
    pub stages: Vec<Stage>,
    /// Per-leaf reconcilers, applied in order per result document
    pub reconcilers: Vec<Reconciler>,
}

impl CompiledPipeline {
    /// Creates an empty pipeline.
    fn empty() -> Self {
        Self {
            stages: Vec::new(),
            reconcilers: Vec::new(),
        }
    }

    /// Appends another pipeline's stages and reconcilers.
    fn extend(&mut self, other: CompiledPipeline) {
        self.stages.extend(other.stages);
        self.reconcilers.extend(other.reconcilers);
    }

    /// Returns the number of stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns true when nothing was compiled.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Compiles canonical expressions against a host collection.
///
/// The resolver and constructor are injected; the compiler holds no global
/// state and may be rebuilt per lookup.
pub struct PipelineCompiler<'a> {
    resolver: &'a dyn SchemaResolver,
    constructor: Arc<dyn DocumentConstructor>,
}

impl<'a> PipelineCompiler<'a> {
    /// Creates a compiler over the given seams.
    pub fn new(resolver: &'a dyn SchemaResolver, constructor: Arc<dyn DocumentConstructor>) -> Self {
        Self {
            resolver,
            constructor,
        }
    }

    /// Compiles an expression tree into a stage sequence plus reconcilers.
    pub fn compile(
        &self,
        expression: &Expression,
        host_collection: &str,
    ) -> CompileResult<CompiledPipeline> {
        match expression {
            Expression::Leaf(predicate) => self.compile_leaf(predicate, host_collection),
            Expression::And(children) => {
                let mut pipeline = CompiledPipeline::empty();
                for child in children {
                    pipeline.extend(self.compile(child, host_collection)?);
                }
                Ok(pipeline)
            }
            Expression::Or(_) => Err(CompileError::UnsupportedCombinator("OR")),
        }
    }

    /// Compiles one leaf predicate into its join+filter pair.
    fn compile_leaf(
        &self,
        predicate: &Predicate,
        host_collection: &str,
    ) -> CompileResult<CompiledPipeline> {
        if predicate.modifier == MatchModifier::Every {
            return Err(CompileError::UnsupportedModifier("every"));
        }

        let resolved = self
            .resolver
            .resolve_reference(host_collection, &predicate.path)?;

        let key = join_key(&predicate.path);
        let match_mode = match resolved.cardinality {
            ReferenceCardinality::Singular => MatchMode::Equals,
            ReferenceCardinality::Many => MatchMode::ContainedIn,
        };

        let stages = vec![
            Stage::Join(JoinStage {
                target_collection: resolved.target_collection.clone(),
                as_key: key.clone(),
                host_field: predicate.path.clone(),
                filter: predicate.query.clone(),
                match_mode,
            }),
            Stage::RequireNonEmpty { field: key.clone() },
        ];

        let reconciler = Reconciler::new(
            predicate.path.clone(),
            key,
            resolved.cardinality,
            resolved.target_collection,
            Arc::clone(&self.constructor),
        );

        Ok(CompiledPipeline {
            stages,
            reconcilers: vec![reconciler],
        })
    }
}
