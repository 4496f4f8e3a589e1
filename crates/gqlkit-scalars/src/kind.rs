//! Kind tags for literal nodes and variable values.

use std::fmt;

use async_graphql_value::Value;
use serde_json::Value as JsonValue;

/// The kind of a literal AST node or a decoded variable value.
///
/// Numbers are split into `Int` and `Float` by how they were written: a
/// number that holds an integer is `Int`, anything else is `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Int,
    Float,
    Boolean,
    Null,
    Enum,
    List,
    Object,
    Variable,
    Binary,
}

impl LiteralKind {
    /// Returns the kind of a literal node from a request document.
    #[must_use]
    pub fn of_literal(literal: &Value) -> Self {
        match literal {
            Value::Variable(_) => Self::Variable,
            Value::Null => Self::Null,
            Value::Number(n) => Self::of_number(n),
            Value::String(_) => Self::String,
            Value::Boolean(_) => Self::Boolean,
            Value::Binary(_) => Self::Binary,
            Value::Enum(_) => Self::Enum,
            Value::List(_) => Self::List,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the kind of a decoded variable value.
    #[must_use]
    pub fn of_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(_) => Self::Boolean,
            JsonValue::Number(n) => Self::of_number(n),
            JsonValue::String(_) => Self::String,
            JsonValue::Array(_) => Self::List,
            JsonValue::Object(_) => Self::Object,
        }
    }

    fn of_number(n: &serde_json::Number) -> Self {
        if n.is_f64() { Self::Float } else { Self::Int }
    }

    /// Upper-case name as used in error messages (`STRING`, `INT`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Boolean => "BOOLEAN",
            Self::Null => "NULL",
            Self::Enum => "ENUM",
            Self::List => "LIST",
            Self::Object => "OBJECT",
            Self::Variable => "VARIABLE",
            Self::Binary => "BINARY",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
