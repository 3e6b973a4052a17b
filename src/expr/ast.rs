//! Canonical expression tree
//!
//! The filter tree a caller submits is normalized into this sum type by the
//! wire parser. The type itself cannot represent a node that mixes AND and
//! OR, so the only combinator validation left to do happens during parsing.

use super::condition::Condition;

/// Modifier controlling how many referenced documents must match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchModifier {
    /// At least one referenced document matches (default)
    #[default]
    Some,
    /// Every referenced document matches; declared for forward
    /// compatibility, rejected at compile time
    Every,
}

impl MatchModifier {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchModifier::Some => "some",
            MatchModifier::Every => "every",
        }
    }
}

/// A leaf predicate naming one relation to filter by
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Reference field on the host collection
    pub path: String,
    /// Filter evaluated against the target collection
    pub query: Condition,
    /// Match modifier
    pub modifier: MatchModifier,
}

impl Predicate {
    /// Creates a predicate with the default `some` modifier.
    pub fn new(path: impl Into<String>, query: Condition) -> Self {
        Self {
            path: path.into(),
            query,
            modifier: MatchModifier::Some,
        }
    }

    /// Sets the match modifier.
    pub fn with_modifier(mut self, modifier: MatchModifier) -> Self {
        self.modifier = modifier;
        self
    }
}

/// Canonical expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A single relation predicate
    Leaf(Predicate),
    /// All children must hold
    And(Vec<Expression>),
    /// At least one child must hold; declared for forward compatibility,
    /// rejected at compile time
    Or(Vec<Expression>),
}

impl Expression {
    /// Wraps a predicate as a leaf node.
    pub fn leaf(predicate: Predicate) -> Self {
        Expression::Leaf(predicate)
    }

    /// Builds an AND node.
    pub fn and(children: Vec<Expression>) -> Self {
        Expression::And(children)
    }

    /// Builds an OR node.
    pub fn or(children: Vec<Expression>) -> Self {
        Expression::Or(children)
    }

    /// Returns the node kind for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Leaf(_) => "leaf",
            Expression::And(_) => "and",
            Expression::Or(_) => "or",
        }
    }

    /// Collects all leaf predicates, depth first, left to right.
    pub fn leaves(&self) -> Vec<&Predicate> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Predicate>) {
        match self {
            Expression::Leaf(predicate) => out.push(predicate),
            Expression::And(children) | Expression::Or(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}
