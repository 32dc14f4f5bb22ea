//! Row-visibility capabilities: soft delete and snapshot exclusion.
//!
//! # Responsibility
//! - Declare which visibility flag columns an entity's table carries.
//! - Resolve the snapshot capability at compile time instead of via
//!   runtime type inspection.
//!
//! # Invariants
//! - `is_deleted = true` means logically removed, never physically.
//! - `is_snapshot = true` rows must not appear in live query results.
//! - A `SnapshotMark` implementor must declare
//!   `FlagColumns::DeletedAndSnapshot`; violations fail compilation at the
//!   first snapshot-scoped query site.

use crate::entity::Entity;
use crate::query::Filter;

/// Flag-column declaration for a soft-deletable entity.
///
/// The two variants are the two entity categories this crate understands:
/// tables carrying only a tombstone flag, and tables carrying a tombstone
/// plus a snapshot flag. The chosen variant decides, at compile time,
/// whether `Query::active` also filters snapshot rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagColumns {
    /// Tombstone flag only.
    DeletedOnly {
        /// Column holding the soft-delete flag.
        deleted: &'static str,
    },
    /// Tombstone flag plus snapshot flag.
    DeletedAndSnapshot {
        /// Column holding the soft-delete flag.
        deleted: &'static str,
        /// Column holding the snapshot flag.
        snapshot: &'static str,
    },
}

impl FlagColumns {
    /// Column holding the soft-delete flag.
    pub const fn deleted(self) -> &'static str {
        match self {
            Self::DeletedOnly { deleted } => deleted,
            Self::DeletedAndSnapshot { deleted, .. } => deleted,
        }
    }

    /// Column holding the snapshot flag, when the table carries one.
    pub const fn snapshot(self) -> Option<&'static str> {
        match self {
            Self::DeletedOnly { .. } => None,
            Self::DeletedAndSnapshot { snapshot, .. } => Some(snapshot),
        }
    }
}

/// Soft-delete capability: the entity's table carries a tombstone flag.
pub trait SoftDelete: Entity {
    /// Visibility flag columns carried by this entity's table.
    const FLAGS: FlagColumns;

    /// Tombstone state of an already-loaded row.
    fn is_deleted(&self) -> bool;

    /// Whether a loaded row is visible to live reads.
    ///
    /// For snapshot-capable entities prefer `SnapshotMark::is_live`, which
    /// also honors the snapshot flag.
    fn is_active(&self) -> bool {
        !self.is_deleted()
    }

    /// Reusable tombstone predicate for query composition.
    fn deleted_flag(value: bool) -> Filter {
        Filter::flag(Self::FLAGS.deleted(), value)
    }
}

/// Snapshot capability: the entity's table additionally carries a
/// point-in-time copy flag.
pub trait SnapshotMark: SoftDelete {
    /// Snapshot state of an already-loaded row.
    fn is_snapshot(&self) -> bool;

    /// Whether a loaded row is live: neither tombstoned nor a snapshot.
    fn is_live(&self) -> bool {
        !self.is_deleted() && !self.is_snapshot()
    }

    /// Reusable snapshot predicate, written once against the capability and
    /// shared by every implementing entity type.
    fn snapshot_flag(value: bool) -> Filter {
        Filter::flag(const { snapshot_column::<Self>() }, value)
    }
}

/// Snapshot flag column for a snapshot-capable entity.
///
/// Callers evaluate this in `const` blocks so that a `SnapshotMark` impl
/// declaring `FlagColumns::DeletedOnly` is rejected during compilation.
pub(crate) const fn snapshot_column<T: SnapshotMark>() -> &'static str {
    match T::FLAGS.snapshot() {
        Some(column) => column,
        None => panic!("SnapshotMark entity must declare FlagColumns::DeletedAndSnapshot"),
    }
}
