//! Attribute value expressions
//!
//! Expressions are not evaluated. Literals are recognised so that tooling
//! can reason about them; everything else keeps its source text.

use serde::{Deserialize, Serialize};

use crate::pos::Range;

/// A literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// The `null` literal
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A numeric literal
    Number(f64),
    /// A quoted string without interpolation
    String(String),
}

impl Value {
    /// Check if this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Kind of expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// A literal value
    Literal(Value),
    /// Any other expression, kept as source text
    Raw(String),
}

/// An expression with its source range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExprKind,
    pub range: Range,
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value, range: Range) -> Self {
        Self {
            kind: ExprKind::Literal(value),
            range,
        }
    }

    /// Create a raw expression
    pub fn raw(text: impl Into<String>, range: Range) -> Self {
        Self {
            kind: ExprKind::Raw(text.into()),
            range,
        }
    }

    /// Create a null literal expression
    pub fn null(range: Range) -> Self {
        Self::literal(Value::Null, range)
    }

    /// Get the literal value, if this is a literal
    pub fn as_literal(&self) -> Option<&Value> {
        match &self.kind {
            ExprKind::Literal(value) => Some(value),
            ExprKind::Raw(_) => None,
        }
    }

    /// Check if this is the null literal
    pub fn is_null(&self) -> bool {
        self.as_literal().is_some_and(Value::is_null)
    }
}
