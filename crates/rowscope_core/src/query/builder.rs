//! Lazy query builder with row-visibility scopes.
//!
//! # Responsibility
//! - Compose predicates, ordering and pagination without touching SQLite.
//! - Execute composed queries and decode rows via `Entity::from_row`.
//!
//! # Invariants
//! - Building a query performs no I/O; only `fetch`/`count`/`exists` execute.
//! - All comparison values reach SQL through `?` binds.
//! - `active` narrows by the tombstone flag, plus the snapshot flag for
//!   entities declaring the snapshot category.

use crate::db::DbError;
use crate::entity::{select_sql, Entity};
use crate::lifecycle::{snapshot_column, SnapshotMark, SoftDelete};
use crate::query::filter::{Filter, SortOrder};
use log::{debug, error};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::time::Instant;

pub type QueryResult<T> = Result<T, QueryError>;

/// Query composition and row decoding errors.
#[derive(Debug)]
pub enum QueryError {
    Db(DbError),
    InvalidData(String),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted row data: {message}"),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for QueryError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for QueryError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Lazy, composable query over one entity table.
///
/// Holds predicates and pagination as plain data; no connection is borrowed
/// and no SQL runs until one of the execution methods is called.
#[derive(Debug)]
pub struct Query<T: Entity> {
    filters: Vec<Filter>,
    order: Vec<(&'static str, SortOrder)>,
    limit: Option<u32>,
    offset: u32,
    marker: PhantomData<fn() -> T>,
}

// Manual impl: a query is clonable regardless of whether the entity is.
impl<T: Entity> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            order: self.order.clone(),
            limit: self.limit,
            offset: self.offset,
            marker: PhantomData,
        }
    }
}

impl<T: Entity> Query<T> {
    /// Full table scan: every row, regardless of visibility flags.
    pub fn all() -> Self {
        Self {
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: 0,
            marker: PhantomData,
        }
    }

    /// Adds one predicate, combined with existing ones by AND.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Appends an ordering column.
    pub fn order_by(mut self, column: &'static str, order: SortOrder) -> Self {
        self.order.push((column, order));
        self
    }

    /// Caps the number of fetched rows.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips leading rows of the result set.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Fetches all matching rows.
    pub fn fetch(&self, conn: &Connection) -> QueryResult<Vec<T>> {
        let started_at = Instant::now();
        let (sql, binds) = self.select_statement();

        match run_select::<T>(conn, &sql, binds) {
            Ok(rows) => {
                debug!(
                    "event=query_fetch module=query status=ok table={} rows={} duration_ms={}",
                    T::TABLE,
                    rows.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(rows)
            }
            Err(err) => {
                error!(
                    "event=query_fetch module=query status=error table={} duration_ms={} error={}",
                    T::TABLE,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Fetches the first matching row, if any.
    ///
    /// A previously set `offset` still applies: this returns the first row
    /// of the offset result set.
    pub fn fetch_one(&self, conn: &Connection) -> QueryResult<Option<T>> {
        let mut query = self.clone();
        query.limit = Some(1);
        Ok(query.fetch(conn)?.into_iter().next())
    }

    /// Counts matching rows. Ignores ordering and pagination.
    pub fn count(&self, conn: &Connection) -> QueryResult<i64> {
        let (where_sql, binds) = self.where_clause();
        let sql = format!("SELECT COUNT(*) FROM {}{where_sql}", T::TABLE);
        let count = conn.query_row(&sql, params_from_iter(binds), |row| row.get::<_, i64>(0))?;
        Ok(count)
    }

    /// Whether at least one row matches. Ignores ordering and pagination.
    pub fn exists(&self, conn: &Connection) -> QueryResult<bool> {
        let (where_sql, binds) = self.where_clause();
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {}{where_sql})", T::TABLE);
        let found = conn.query_row(&sql, params_from_iter(binds), |row| row.get::<_, i64>(0))?;
        Ok(found != 0)
    }

    fn where_clause(&self) -> (String, Vec<Value>) {
        let mut sql = String::from(" WHERE 1 = 1");
        let mut binds = Vec::new();

        for filter in &self.filters {
            filter.render(&mut sql, &mut binds);
        }

        (sql, binds)
    }

    fn select_statement(&self) -> (String, Vec<Value>) {
        let (where_sql, mut binds) = self.where_clause();
        let mut sql = select_sql::<T>();
        sql.push_str(&where_sql);

        for (index, (column, order)) in self.order.iter().enumerate() {
            sql.push_str(if index == 0 { " ORDER BY " } else { ", " });
            sql.push_str(column);
            sql.push(' ');
            sql.push_str(order.sql());
        }

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            binds.push(Value::Integer(i64::from(limit)));
            if self.offset > 0 {
                sql.push_str(" OFFSET ?");
                binds.push(Value::Integer(i64::from(self.offset)));
            }
        } else if self.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            binds.push(Value::Integer(i64::from(self.offset)));
        }

        (sql, binds)
    }
}

impl<T: SoftDelete> Query<T> {
    /// Live rows: tombstone clear, and snapshot flag clear for entities
    /// declaring the snapshot category.
    pub fn active() -> Self {
        let query = Self::all().filter(Filter::flag(T::FLAGS.deleted(), false));
        match T::FLAGS.snapshot() {
            Some(column) => query.filter(Filter::flag(column, false)),
            None => query,
        }
    }

    /// Soft-deleted rows, snapshots included when tombstoned.
    pub fn recycle_bin() -> Self {
        Self::all().filter(Filter::flag(T::FLAGS.deleted(), true))
    }
}

impl<T: SnapshotMark> Query<T> {
    /// Snapshot rows, tombstoned ones included.
    pub fn snapshots() -> Self {
        Self::snapshot_state(true)
    }

    /// Rows whose snapshot flag matches `value`; the single generic
    /// predicate shared by every snapshot-capable entity type.
    pub fn snapshot_state(value: bool) -> Self {
        Self::all().filter(Filter::flag(const { snapshot_column::<T>() }, value))
    }
}

fn run_select<T: Entity>(conn: &Connection, sql: &str, binds: Vec<Value>) -> QueryResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params_from_iter(binds))?;
    let mut decoded = Vec::new();

    while let Some(row) = rows.next()? {
        decoded.push(T::from_row(row)?);
    }

    Ok(decoded)
}
