//! Column predicates and their parameterized SQL rendering.
//!
//! # Responsibility
//! - Model single-column comparisons usable across entity types.
//! - Render predicates to `?`-bound SQL fragments, never interpolated values.
//!
//! # Invariants
//! - Column names are `&'static str` constants supplied by entity
//!   declarations, not runtime input.
//! - Boolean flags are stored and bound as SQLite integers 0/1.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// Comparison operator for column predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// Equal to.
    Eq,
    /// Not equal to.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// SQL `LIKE` pattern match.
    Like,
}

impl FilterOp {
    pub(crate) fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
        }
    }
}

/// Sort direction for query ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub(crate) fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One column comparison, composable with others by conjunction.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Column to filter on.
    pub column: &'static str,
    /// Operator to apply.
    pub op: FilterOp,
    /// Bound comparison value.
    pub value: Value,
}

impl Filter {
    /// Creates a new column predicate.
    pub fn new(column: &'static str, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            column,
            op,
            value: value.into(),
        }
    }

    /// Equality predicate.
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Eq, value)
    }

    /// Inequality predicate.
    pub fn ne(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Ne, value)
    }

    /// Greater-than predicate.
    pub fn gt(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Gt, value)
    }

    /// Greater-than-or-equal predicate.
    pub fn gte(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Gte, value)
    }

    /// Less-than predicate.
    pub fn lt(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Lt, value)
    }

    /// Less-than-or-equal predicate.
    pub fn lte(column: &'static str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Lte, value)
    }

    /// `LIKE` pattern predicate.
    pub fn like(column: &'static str, pattern: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Like, Value::Text(pattern.into()))
    }

    /// Boolean flag predicate over a 0/1 integer column.
    pub fn flag(column: &'static str, value: bool) -> Self {
        Self::new(column, FilterOp::Eq, bool_to_int(value))
    }

    /// Appends this predicate as an `AND` clause and records its bind value.
    pub(crate) fn render(&self, sql: &mut String, binds: &mut Vec<Value>) {
        sql.push_str(" AND ");
        sql.push_str(self.column);
        sql.push(' ');
        sql.push_str(self.op.sql());
        sql.push_str(" ?");
        binds.push(self.value.clone());
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
