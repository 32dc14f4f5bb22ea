//! Entity contracts for queryable SQLite tables.
//!
//! # Responsibility
//! - Declare table/column metadata consumed by the query builder.
//! - Decode SQL rows into domain structs with strict validation.
//!
//! # Invariants
//! - `TABLE` and `COLUMNS` are compile-time constants, never user input.
//! - Row decoding rejects invalid persisted state instead of masking it.

use crate::query::{QueryError, QueryResult};
use rusqlite::Row;

/// A struct backed by one SQLite table.
///
/// Implementations own the mapping between their fields and the declared
/// columns; the query layer never inspects business fields.
pub trait Entity: Sized {
    /// Table name this entity is stored in.
    const TABLE: &'static str;

    /// Columns selected for this entity, in `from_row` order.
    const COLUMNS: &'static [&'static str];

    /// Decodes one selected row into the entity.
    ///
    /// Must fail with `QueryError::InvalidData` on persisted state the
    /// entity considers invalid, rather than repairing it silently.
    fn from_row(row: &Row<'_>) -> QueryResult<Self>;
}

/// Builds the `SELECT ... FROM table` head for an entity.
pub(crate) fn select_sql<T: Entity>() -> String {
    format!("SELECT {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
}

/// Reads a boolean flag column stored as SQLite integer.
///
/// Accepts exactly 0 and 1; any other persisted value is invalid data.
pub fn read_flag(row: &Row<'_>, column: &str) -> QueryResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(QueryError::InvalidData(format!(
            "invalid flag value `{other}` in column `{column}`"
        ))),
    }
}
