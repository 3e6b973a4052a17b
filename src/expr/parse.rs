//! Wire-grammar parser for filter expressions
//!
//! The grammar, applied at every level of the tree:
//! - a JSON array is an implicit AND of its elements
//! - an object with an `AND` or `OR` key is a combinator node; a node
//!   carrying both keys is rejected before compilation
//! - any other object is a leaf predicate: `{path, query, modifiers?}`
//!
//! Normalization and validation happen here; the resulting `Expression`
//! cannot represent a mixed AND/OR node.

use serde_json::{Map, Value};

use super::ast::{Expression, MatchModifier, Predicate};
use super::condition::Condition;
use super::errors::{ExpressionError, ExpressionResult};

/// Combinator key for conjunction nodes.
const AND_KEY: &str = "AND";
/// Combinator key for disjunction nodes.
const OR_KEY: &str = "OR";

/// Parses raw wire expressions into canonical trees.
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parses a raw wire value into a canonical expression.
    pub fn parse(raw: &Value) -> ExpressionResult<Expression> {
        match raw {
            Value::Array(items) => {
                // Implicit AND
                let children = items
                    .iter()
                    .map(Self::parse)
                    .collect::<ExpressionResult<Vec<_>>>()?;
                Ok(Expression::and(children))
            }
            Value::Object(obj) => {
                let has_and = obj.contains_key(AND_KEY);
                let has_or = obj.contains_key(OR_KEY);

                if has_and && has_or {
                    return Err(ExpressionError::conflicting_combinators());
                }
                if has_and {
                    return Self::parse_combinator(obj, AND_KEY).map(Expression::and);
                }
                if has_or {
                    return Self::parse_combinator(obj, OR_KEY).map(Expression::or);
                }
                Self::parse_leaf(obj).map(Expression::leaf)
            }
            _ => Err(ExpressionError::invalid(
                "expression must be an object or an array",
            )),
        }
    }

    /// Parses the children of a combinator node.
    fn parse_combinator(obj: &Map<String, Value>, key: &str) -> ExpressionResult<Vec<Expression>> {
        if obj.len() != 1 {
            return Err(ExpressionError::invalid(format!(
                "a {} node must not carry other keys",
                key
            )));
        }

        let children = obj.get(key).and_then(Value::as_array).ok_or_else(|| {
            ExpressionError::invalid(format!("{} children must be an array", key))
        })?;

        children.iter().map(Self::parse).collect()
    }

    /// Parses a leaf predicate object.
    fn parse_leaf(obj: &Map<String, Value>) -> ExpressionResult<Predicate> {
        for key in obj.keys() {
            if key != "path" && key != "query" && key != "modifiers" {
                return Err(ExpressionError::invalid(format!(
                    "unknown key '{}' in predicate",
                    key
                )));
            }
        }

        let path = obj
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| ExpressionError::invalid("predicate requires a string 'path'"))?;

        let query = obj
            .get("query")
            .ok_or_else(|| ExpressionError::invalid("predicate requires a 'query'"))?;
        let query = Condition::parse(query)?;

        let modifier = match obj.get("modifiers") {
            None => MatchModifier::Some,
            Some(modifiers) => Self::parse_modifiers(modifiers)?,
        };

        Ok(Predicate::new(path, query).with_modifier(modifier))
    }

    /// Parses the optional modifiers object.
    fn parse_modifiers(raw: &Value) -> ExpressionResult<MatchModifier> {
        let obj = raw
            .as_object()
            .ok_or_else(|| ExpressionError::invalid("'modifiers' must be an object"))?;

        let some = obj.get("some").and_then(Value::as_bool).unwrap_or(false);
        let every = obj.get("every").and_then(Value::as_bool).unwrap_or(false);

        for key in obj.keys() {
            if key != "some" && key != "every" {
                return Err(ExpressionError::invalid(format!(
                    "unknown modifier '{}'",
                    key
                )));
            }
        }

        match (some, every) {
            (true, true) => Err(ExpressionError::invalid(
                "'some' and 'every' are mutually exclusive",
            )),
            (_, true) => Ok(MatchModifier::Every),
            _ => Ok(MatchModifier::Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::errors::ExpressionErrorCode;
    use serde_json::json;

    #[test]
    fn test_parse_single_leaf() {
        let raw = json!({"path": "author", "query": {"name": "Jess Telford"}});
        let expr = ExpressionParser::parse(&raw).unwrap();

        match expr {
            Expression::Leaf(predicate) => {
                assert_eq!(predicate.path, "author");
                assert_eq!(predicate.modifier, MatchModifier::Some);
            }
            other => panic!("expected leaf, got {}", other.kind()),
        }
    }

    #[test]
    fn test_parse_array_is_implicit_and() {
        let raw = json!([
            {"path": "categories", "query": {"name": {"in": ["React"]}}},
            {"path": "author", "query": {"name": {"in": ["Jess Telford"]}}},
        ]);
        let expr = ExpressionParser::parse(&raw).unwrap();

        match expr {
            Expression::And(children) => assert_eq!(children.len(), 2),
            other => panic!("expected and, got {}", other.kind()),
        }
    }

    #[test]
    fn test_parse_explicit_and() {
        let raw = json!({"AND": [{"path": "author", "query": {}}]});
        let expr = ExpressionParser::parse(&raw).unwrap();
        assert_eq!(expr.kind(), "and");
    }

    #[test]
    fn test_parse_or_is_representable() {
        let raw = json!({"OR": [{"path": "author", "query": {}}]});
        let expr = ExpressionParser::parse(&raw).unwrap();
        assert_eq!(expr.kind(), "or");
    }

    #[test]
    fn test_conflicting_combinators_rejected() {
        let raw = json!({
            "AND": [{"path": "author", "query": {}}],
            "OR": [{"path": "categories", "query": {}}],
        });
        let err = ExpressionParser::parse(&raw).unwrap_err();
        assert_eq!(err.code(), ExpressionErrorCode::AeroExprConflictingCombinators);
    }

    #[test]
    fn test_combinator_with_stray_keys_rejected() {
        let raw = json!({"AND": [], "path": "author"});
        let err = ExpressionParser::parse(&raw).unwrap_err();
        assert_eq!(err.code(), ExpressionErrorCode::AeroExprInvalid);
    }

    #[test]
    fn test_nested_normalization() {
        let raw = json!({"AND": [
            [{"path": "author", "query": {}}],
            {"path": "categories", "query": {}},
        ]});
        let expr = ExpressionParser::parse(&raw).unwrap();
        assert_eq!(expr.leaves().len(), 2);
    }

    #[test]
    fn test_every_modifier_parsed() {
        let raw = json!({"path": "categories", "query": {}, "modifiers": {"every": true}});
        let expr = ExpressionParser::parse(&raw).unwrap();
        match expr {
            Expression::Leaf(predicate) => assert_eq!(predicate.modifier, MatchModifier::Every),
            other => panic!("expected leaf, got {}", other.kind()),
        }
    }

    #[test]
    fn test_modifiers_mutually_exclusive() {
        let raw = json!({"path": "a", "query": {}, "modifiers": {"some": true, "every": true}});
        assert!(ExpressionParser::parse(&raw).is_err());
    }

    #[test]
    fn test_scalar_expression_rejected() {
        assert!(ExpressionParser::parse(&json!("author")).is_err());
        assert!(ExpressionParser::parse(&json!(42)).is_err());
    }

    #[test]
    fn test_missing_query_rejected() {
        let raw = json!({"path": "author"});
        assert!(ExpressionParser::parse(&raw).is_err());
    }
}
