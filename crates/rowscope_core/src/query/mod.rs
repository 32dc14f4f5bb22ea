//! Lazy query composition over entity tables.
//!
//! # Responsibility
//! - Provide composable predicates and visibility scopes over `Entity` tables.
//! - Keep SQL rendering and execution details inside this module boundary.
//!
//! # Invariants
//! - Query construction performs no I/O; execution is explicit.
//! - Scope filters and caller filters combine with AND, order-independent.

pub mod builder;
pub mod filter;

pub use builder::{Query, QueryError, QueryResult};
pub use filter::{Filter, FilterOp, SortOrder};
