//! Row-visibility scopes for SQLite-backed entity stores.
//! This crate is the single source of truth for soft-delete and snapshot
//! filtering semantics; it narrows reads and never owns entity lifecycle.

pub mod db;
pub mod entity;
pub mod lifecycle;
pub mod logging;
pub mod query;

pub use db::migrations::{apply_migrations, latest_version, Migration};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use entity::{read_flag, Entity};
pub use lifecycle::{FlagColumns, SnapshotMark, SoftDelete};
pub use logging::{default_log_level, init_logging, logging_status};
pub use query::{Filter, FilterOp, Query, QueryError, QueryResult, SortOrder};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
