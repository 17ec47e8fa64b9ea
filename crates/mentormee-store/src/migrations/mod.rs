//! Schema migrations, applied by [`Database::open_at`] and
//! [`Database::open_in_memory`].
//!
//! The schema version lives in `PRAGMA user_version`.  Each pending step runs
//! in its own transaction together with the version bump, so a failed step
//! leaves the database at the last good version.
//!
//! [`Database::open_at`]: crate::Database::open_at
//! [`Database::open_in_memory`]: crate::Database::open_in_memory

pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// One schema step: the version it produces and how to get there.
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Connection) -> rusqlite::Result<()>,
}

/// Every step, oldest first.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "v001_initial",
    up: v001_initial::up,
}];

/// Version a fully migrated database reports.
pub const CURRENT_VERSION: u32 = 1;

/// Bring `conn` up to [`CURRENT_VERSION`].  Already-applied steps are skipped.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let mut version = schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "database is at schema v{version}, newer than supported v{CURRENT_VERSION}"
        )));
    }

    for step in MIGRATIONS.iter().filter(move |m| m.version > version) {
        tracing::info!(from = version, to = step.version, name = step.name, "applying migration");

        let tx = conn.unchecked_transaction()?;
        (step.up)(&tx).map_err(|e| StoreError::Migration(format!("{}: {e}", step.name)))?;
        tx.pragma_update(None, "user_version", step.version)?;
        tx.commit()?;

        version = step.version;
    }

    tracing::debug!(version, "schema up to date");
    Ok(())
}

/// Read back the schema version stamped on the connection.
pub fn schema_version(conn: &Connection) -> Result<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
