//! Conditions evaluated against a target collection
//!
//! A condition is the opaque per-relation filter of a leaf predicate: a
//! conjunction of field clauses matched against related documents. The wire
//! form mirrors the query objects callers already write:
//!
//! ```json
//! {"name": "Jess Telford"}
//! {"name": {"in": ["React", "GraphQL"]}}
//! {"name": {"matches": "(?i)jess"}, "karma": {"gte": 10}}
//! ```

use regex::Regex;
use serde_json::Value;

use super::errors::{ExpressionError, ExpressionResult};

/// A single match operation against a field
#[derive(Debug, Clone)]
pub enum MatchOp {
    /// Exact equality, no coercion
    Eq(Value),
    /// Membership in a fixed set of values
    In(Vec<Value>),
    /// Greater than
    Gt(Value),
    /// Greater than or equal
    Gte(Value),
    /// Less than
    Lt(Value),
    /// Less than or equal
    Lte(Value),
    /// Regular expression match on string fields
    Matches(Regex),
}

impl MatchOp {
    /// Returns the operation name as written on the wire
    pub fn op_name(&self) -> &'static str {
        match self {
            MatchOp::Eq(_) => "eq",
            MatchOp::In(_) => "in",
            MatchOp::Gt(_) => "gt",
            MatchOp::Gte(_) => "gte",
            MatchOp::Lt(_) => "lt",
            MatchOp::Lte(_) => "lte",
            MatchOp::Matches(_) => "matches",
        }
    }
}

impl PartialEq for MatchOp {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MatchOp::Eq(a), MatchOp::Eq(b)) => a == b,
            (MatchOp::In(a), MatchOp::In(b)) => a == b,
            (MatchOp::Gt(a), MatchOp::Gt(b)) => a == b,
            (MatchOp::Gte(a), MatchOp::Gte(b)) => a == b,
            (MatchOp::Lt(a), MatchOp::Lt(b)) => a == b,
            (MatchOp::Lte(a), MatchOp::Lte(b)) => a == b,
            (MatchOp::Matches(a), MatchOp::Matches(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// One field clause of a condition
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionClause {
    /// Field name on the target collection
    pub field: String,
    /// Match operation
    pub op: MatchOp,
}

impl ConditionClause {
    /// Create an equality clause
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: MatchOp::Eq(value),
        }
    }

    /// Create a set-membership clause
    pub fn is_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            field: field.into(),
            op: MatchOp::In(values),
        }
    }

    /// Create a regex clause; fails on an invalid pattern
    pub fn matches(field: impl Into<String>, pattern: &str) -> ExpressionResult<Self> {
        let re = Regex::new(pattern)
            .map_err(|e| ExpressionError::bad_regex(pattern, e.to_string()))?;
        Ok(Self {
            field: field.into(),
            op: MatchOp::Matches(re),
        })
    }
}

/// Conjunction of clauses evaluated against one related document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Condition {
    /// All clauses must match
    pub clauses: Vec<ConditionClause>,
}

impl Condition {
    /// Creates an empty condition (matches every document).
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Adds a clause.
    pub fn with_clause(mut self, clause: ConditionClause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Returns true when the condition has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Parses a wire condition object.
    ///
    /// Each entry is either `field: value` (equality) or
    /// `field: { op: operand }` with exactly one operator key.
    pub fn parse(raw: &Value) -> ExpressionResult<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| ExpressionError::bad_condition("condition must be an object"))?;

        let mut condition = Condition::new();
        for (field, raw_clause) in obj {
            condition.clauses.push(Self::parse_clause(field, raw_clause)?);
        }
        Ok(condition)
    }

    /// Parses one clause from its wire form.
    fn parse_clause(field: &str, raw_clause: &Value) -> ExpressionResult<ConditionClause> {
        let inner = match raw_clause.as_object() {
            Some(inner) => inner,
            // Bare values are equality matches
            None => return Ok(ConditionClause::eq(field, raw_clause.clone())),
        };

        let mut entries = inner.iter();
        let (op, operand) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(ExpressionError::bad_condition(format!(
                    "clause for '{}' must hold exactly one operator",
                    field
                )))
            }
        };

        let op = match op.as_str() {
            "eq" => MatchOp::Eq(operand.clone()),
            "in" => {
                let items = operand.as_array().ok_or_else(|| {
                    ExpressionError::bad_condition(format!(
                        "'in' operand for '{}' must be an array",
                        field
                    ))
                })?;
                MatchOp::In(items.clone())
            }
            "gt" => MatchOp::Gt(operand.clone()),
            "gte" => MatchOp::Gte(operand.clone()),
            "lt" => MatchOp::Lt(operand.clone()),
            "lte" => MatchOp::Lte(operand.clone()),
            "matches" => {
                let pattern = operand.as_str().ok_or_else(|| {
                    ExpressionError::bad_condition(format!(
                        "'matches' operand for '{}' must be a string",
                        field
                    ))
                })?;
                let re = Regex::new(pattern)
                    .map_err(|e| ExpressionError::bad_regex(pattern, e.to_string()))?;
                MatchOp::Matches(re)
            }
            other => {
                return Err(ExpressionError::bad_condition(format!(
                    "unknown operator '{}' for '{}'",
                    other, field
                )))
            }
        };

        Ok(ConditionClause {
            field: field.to_string(),
            op,
        })
    }
}
