//! Condition evaluation for join stages
//!
//! Evaluates conditions strictly against candidate target documents.
//! No type coercion: a missing field never matches, a null never matches,
//! ordered comparison works only within numbers and within strings.

use std::cmp::Ordering;

use serde_json::Value;

use crate::expr::{Condition, ConditionClause, MatchOp};

/// Evaluates conditions against documents
pub struct ConditionFilter;

impl ConditionFilter {
    /// Checks whether a document satisfies every clause of a condition.
    pub fn matches(document: &Value, condition: &Condition) -> bool {
        condition
            .clauses
            .iter()
            .all(|clause| Self::matches_clause(document, clause))
    }

    /// Checks a single clause.
    fn matches_clause(document: &Value, clause: &ConditionClause) -> bool {
        let actual = match document.get(&clause.field) {
            Some(value) if !value.is_null() => value,
            _ => return false,
        };

        match &clause.op {
            MatchOp::Eq(expected) => actual == expected,
            MatchOp::In(options) => options.iter().any(|option| option == actual),
            MatchOp::Gt(bound) => Self::compare(actual, bound) == Some(Ordering::Greater),
            MatchOp::Gte(bound) => matches!(
                Self::compare(actual, bound),
                Some(Ordering::Greater) | Some(Ordering::Equal)
            ),
            MatchOp::Lt(bound) => Self::compare(actual, bound) == Some(Ordering::Less),
            MatchOp::Lte(bound) => matches!(
                Self::compare(actual, bound),
                Some(Ordering::Less) | Some(Ordering::Equal)
            ),
            MatchOp::Matches(re) => actual.as_str().map_or(false, |s| re.is_match(s)),
        }
    }

    /// Orders two values when they are comparable: numbers against numbers,
    /// strings against strings, nothing else.
    fn compare(actual: &Value, bound: &Value) -> Option<Ordering> {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ConditionClause;
    use serde_json::json;

    fn one(clause: ConditionClause) -> Condition {
        Condition::new().with_clause(clause)
    }

    #[test]
    fn test_equality_no_coercion() {
        let doc = json!({"value": 123});
        assert!(ConditionFilter::matches(
            &doc,
            &one(ConditionClause::eq("value", json!(123)))
        ));
        // String "123" must not match integer 123
        assert!(!ConditionFilter::matches(
            &doc,
            &one(ConditionClause::eq("value", json!("123")))
        ));
    }

    #[test]
    fn test_in_membership() {
        let doc = json!({"name": "React"});
        let condition = one(ConditionClause::is_in(
            "name",
            vec![json!("React"), json!("GraphQL")],
        ));
        assert!(ConditionFilter::matches(&doc, &condition));

        let miss = json!({"name": "frontend"});
        assert!(!ConditionFilter::matches(&miss, &condition));
    }

    #[test]
    fn test_ordered_comparison() {
        let doc = json!({"age": 25});
        let parse = |raw| Condition::parse(&raw).unwrap();

        assert!(ConditionFilter::matches(&doc, &parse(json!({"age": {"gte": 18}}))));
        assert!(ConditionFilter::matches(&doc, &parse(json!({"age": {"lte": 25}}))));
        assert!(!ConditionFilter::matches(&doc, &parse(json!({"age": {"gt": 25}}))));
        assert!(!ConditionFilter::matches(&doc, &parse(json!({"age": {"lt": 25}}))));
    }

    #[test]
    fn test_strings_order_lexicographically() {
        let doc = json!({"name": "bravo"});
        let condition = Condition::parse(&json!({"name": {"gt": "alpha"}})).unwrap();
        assert!(ConditionFilter::matches(&doc, &condition));
    }

    #[test]
    fn test_mixed_types_never_order() {
        let doc = json!({"age": 25});
        let condition = Condition::parse(&json!({"age": {"gt": "18"}})).unwrap();
        assert!(!ConditionFilter::matches(&doc, &condition));
    }

    #[test]
    fn test_regex_match() {
        let doc = json!({"name": "Jess Telford"});
        let condition = one(ConditionClause::matches("name", "(?i)jess").unwrap());
        assert!(ConditionFilter::matches(&doc, &condition));

        let miss = json!({"name": "Jed Watson"});
        assert!(!ConditionFilter::matches(&miss, &condition));
    }

    #[test]
    fn test_missing_and_null_never_match() {
        let condition = one(ConditionClause::eq("name", json!("x")));
        assert!(!ConditionFilter::matches(&json!({}), &condition));
        assert!(!ConditionFilter::matches(&json!({"name": null}), &condition));
    }

    #[test]
    fn test_empty_condition_matches_everything() {
        assert!(ConditionFilter::matches(&json!({"any": 1}), &Condition::new()));
    }

    #[test]
    fn test_all_clauses_must_hold() {
        let doc = json!({"name": "React", "active": true});
        let condition = Condition::new()
            .with_clause(ConditionClause::eq("name", json!("React")))
            .with_clause(ConditionClause::eq("active", json!(false)));
        assert!(!ConditionFilter::matches(&doc, &condition));
    }
}
