//! SQLite migration executor over caller-supplied registries.
//!
//! # Responsibility
//! - Validate a migration registry before touching the database.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - Registry versions must be strictly increasing, starting at 1 or above.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// One schema migration step.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    /// Target schema version after this step applies.
    pub version: u32,
    /// SQL batch executed for this step.
    pub sql: &'static str,
}

/// Returns the latest version named by the registry.
pub fn latest_version(migrations: &[Migration]) -> u32 {
    migrations.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations from the registry.
///
/// # Errors
/// - `DbError::MigrationOrder` when registry versions are not strictly
///   increasing positive numbers.
/// - `DbError::UnsupportedSchemaVersion` when the database was written by a
///   newer registry than this one.
pub fn apply_migrations(conn: &mut Connection, migrations: &[Migration]) -> DbResult<()> {
    validate_registry(migrations)?;

    let current_version = current_user_version(conn)?;
    let latest = latest_version(migrations);

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in migrations {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn validate_registry(migrations: &[Migration]) -> DbResult<()> {
    let mut previous = 0;
    for migration in migrations {
        if migration.version <= previous {
            return Err(DbError::MigrationOrder {
                previous,
                version: migration.version,
            });
        }
        previous = migration.version;
    }
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
