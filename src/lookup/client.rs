//! The lookup entry point
//!
//! Ties the phases together: parse the wire expression, compile it against
//! the host collection, run the single engine call, then fold each result
//! document through the reconcilers in compiled order. A reconciler
//! returning nothing drops the document from the final result; any error
//! aborts the whole call.

use std::sync::Arc;

use serde_json::Value;

use crate::compiler::{ExplainPipeline, PipelineCompiler};
use crate::document::{DocumentConstructor, RawConstructor};
use crate::executor::ExecutionEngine;
use crate::expr::{Expression, ExpressionParser};
use crate::observability::{Logger, LookupEvent};
use crate::schema::SchemaResolver;

use super::errors::LookupResult;

/// Relational-join lookup over a host collection.
///
/// All collaborators are injected: the schema resolver supplies reference
/// metadata, the engine runs compiled pipelines, the constructor hydrates
/// embedded sub-documents. A client is cheap to clone-by-Arc and safe to
/// share across concurrent lookups; it holds no per-request state.
pub struct LookupClient {
    resolver: Arc<dyn SchemaResolver>,
    engine: Arc<dyn ExecutionEngine>,
    constructor: Arc<dyn DocumentConstructor>,
}

impl LookupClient {
    /// Creates a client with the pass-through document constructor.
    pub fn new(resolver: Arc<dyn SchemaResolver>, engine: Arc<dyn ExecutionEngine>) -> Self {
        Self {
            resolver,
            engine,
            constructor: Arc::new(RawConstructor),
        }
    }

    /// Replaces the document constructor.
    pub fn with_constructor(mut self, constructor: Arc<dyn DocumentConstructor>) -> Self {
        self.constructor = constructor;
        self
    }

    /// Looks up host documents matching a wire-form expression.
    ///
    /// Accepts the raw grammar: a predicate object, an array (implicit
    /// AND), or an explicit `{AND: [...]}` / `{OR: [...]}` node.
    pub async fn lookup(
        &self,
        host_collection: &str,
        expression: &Value,
    ) -> LookupResult<Vec<Value>> {
        let parsed = ExpressionParser::parse(expression)?;
        self.lookup_expr(host_collection, &parsed).await
    }

    /// Looks up host documents matching an already-built expression tree.
    pub async fn lookup_expr(
        &self,
        host_collection: &str,
        expression: &Expression,
    ) -> LookupResult<Vec<Value>> {
        match self.run(host_collection, expression).await {
            Ok(documents) => Ok(documents),
            Err(err) => {
                Logger::error(
                    LookupEvent::LookupFailed.as_str(),
                    &[
                        ("collection", host_collection),
                        ("code", err.code()),
                        ("error", &err.to_string()),
                    ],
                );
                Err(err)
            }
        }
    }

    /// Compile, execute once, reconcile.
    async fn run(
        &self,
        host_collection: &str,
        expression: &Expression,
    ) -> LookupResult<Vec<Value>> {
        Logger::info(
            LookupEvent::LookupReceived.as_str(),
            &[
                ("collection", host_collection),
                ("expression", expression.kind()),
            ],
        );

        let compiler = PipelineCompiler::new(self.resolver.as_ref(), Arc::clone(&self.constructor));
        let pipeline = compiler.compile(expression, host_collection)?;
        Logger::debug(
            LookupEvent::PipelineCompiled.as_str(),
            &[
                ("collection", host_collection),
                ("stages", &pipeline.stage_count().to_string()),
                ("plan", &ExplainPipeline::render(&pipeline)),
            ],
        );

        // The single engine call of this lookup
        let raw = self.engine.execute(host_collection, &pipeline.stages).await?;
        Logger::debug(
            LookupEvent::ExecuteComplete.as_str(),
            &[
                ("collection", host_collection),
                ("documents", &raw.len().to_string()),
            ],
        );

        let mut results = Vec::with_capacity(raw.len());
        for document in raw {
            let mut current = Some(document);
            for reconciler in &pipeline.reconcilers {
                current = reconciler.apply(current)?;
                if current.is_none() {
                    break;
                }
            }
            if let Some(document) = current {
                results.push(document);
            }
        }

        Logger::info(
            LookupEvent::ReconcileComplete.as_str(),
            &[
                ("collection", host_collection),
                ("returned", &results.len().to_string()),
            ],
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::MemoryEngine;
    use crate::schema::{CollectionSchema, FieldDef, SchemaRegistry};
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::collections::HashMap;

    fn client() -> LookupClient {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), FieldDef::required_string());
        fields.insert("author".to_string(), FieldDef::reference("users"));
        let mut registry = SchemaRegistry::new();
        registry
            .register(CollectionSchema::new("posts", fields))
            .unwrap();

        let mut store = MemoryStore::new();
        store
            .insert("users", json!({"_id": "u1", "name": "Jess Telford"}))
            .unwrap();
        store
            .insert(
                "posts",
                json!({"_id": "p1", "title": "Something", "author": "u1"}),
            )
            .unwrap();

        let engine = MemoryEngine::new(Arc::new(store));
        LookupClient::new(Arc::new(registry), Arc::new(engine))
    }

    #[tokio::test]
    async fn test_lookup_embeds_singular_reference() {
        let out = client()
            .lookup("posts", &json!({"path": "author", "query": {"name": "Jess Telford"}}))
            .await
            .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["author"]["_id"], "u1");
        assert!(out[0].get("author__matched").is_none());
    }

    #[tokio::test]
    async fn test_lookup_or_is_unsupported() {
        let err = client()
            .lookup(
                "posts",
                &json!({"OR": [{"path": "author", "query": {}}]}),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "AERO_JOIN_UNSUPPORTED_COMBINATOR");
    }

    #[tokio::test]
    async fn test_lookup_conflicting_combinators() {
        let err = client()
            .lookup(
                "posts",
                &json!({"AND": [], "OR": []}),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "AERO_EXPR_CONFLICTING_COMBINATORS");
    }
}
