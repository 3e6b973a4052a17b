//! Explain rendering for compiled pipelines

use super::compiler::CompiledPipeline;

/// Renders a compiled pipeline for logs and debugging.
pub struct ExplainPipeline;

impl ExplainPipeline {
    /// Returns one summary line per stage, in execution order.
    pub fn lines(pipeline: &CompiledPipeline) -> Vec<String> {
        pipeline.stages.iter().map(|stage| stage.summary()).collect()
    }

    /// Returns the whole pipeline as a single `;`-joined string.
    pub fn render(pipeline: &CompiledPipeline) -> String {
        Self::lines(pipeline).join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{PipelineCompiler, Stage};
    use crate::document::RawConstructor;
    use crate::expr::{Condition, Expression, Predicate};
    use crate::schema::{CollectionSchema, FieldDef, SchemaRegistry};
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_render_lists_stages_in_order() {
        let mut fields = HashMap::new();
        fields.insert("author".to_string(), FieldDef::reference("users"));
        let mut registry = SchemaRegistry::new();
        registry
            .register(CollectionSchema::new("posts", fields))
            .unwrap();

        let compiler = PipelineCompiler::new(&registry, Arc::new(RawConstructor));
        let expr = Expression::leaf(Predicate::new("author", Condition::new()));
        let pipeline = compiler.compile(&expr, "posts").unwrap();

        let rendered = ExplainPipeline::render(&pipeline);
        assert!(rendered.contains("JOIN users"));
        assert!(rendered.contains("REQUIRE_NON_EMPTY author__matched"));

        let lines = ExplainPipeline::lines(&pipeline);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], pipeline.stages[0].summary());
        assert!(matches!(pipeline.stages[1], Stage::RequireNonEmpty { .. }));
    }
}
