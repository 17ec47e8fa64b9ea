//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation.  Opening is idempotent:
//! every collection is created if missing and left untouched otherwise.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::migrations;
use crate::storage::StoreTx;

/// Wrapper around a [`rusqlite::Connection`].
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

/// Platform data directory for MentorMee.
///
/// - Linux:   `~/.local/share/mentormee`
/// - macOS:   `~/Library/Application Support/com.mentormee.mentormee`
/// - Windows: `{FOLDERID_RoamingAppData}\mentormee\mentormee\data`
pub fn default_data_dir() -> Result<PathBuf> {
    let project_dirs =
        ProjectDirs::from("com", "mentormee", "mentormee").ok_or(StoreError::NoDataDir)?;
    Ok(project_dirs.data_dir().to_path_buf())
}

impl Database {
    /// Open (or create) a database at an explicit path.
    ///
    /// Parent directories are created as needed.  This is what tests and the
    /// configured core use.
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Open a throwaway database that lives only as long as the handle.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    ///
    /// Callers should prefer the typed CRUD helpers, but direct access is
    /// occasionally needed for ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn
            .path()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    /// Run `f` inside a single SQLite transaction.
    ///
    /// The transaction commits only if `f` returns `Ok`; any error (or a
    /// panic) drops the transaction, which rolls back every write `f` made.
    pub fn transaction<T, E, F>(&mut self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&StoreTx<'_>) -> std::result::Result<T, E>,
        E: From<StoreError>,
    {
        let tx = self.conn.transaction().map_err(StoreError::from)?;
        let store_tx = StoreTx::new(tx);

        let out = f(&store_tx)?;

        store_tx.commit()?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Post;
    use crate::posts::PostStore;

    #[test]
    fn open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let db = Database::open_at(&path).expect("should open");
        assert!(db.path().is_some());
    }

    #[test]
    fn reopen_is_idempotent_and_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("test.db");

        let post = Post::new("hello", "alice");
        {
            let db = Database::open_at(&path).unwrap();
            db.put_post(&post).unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get_post(post.id).unwrap(), Some(post));
    }

    #[test]
    fn open_fails_when_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Database::open_at(dir.path()).is_err());
    }

    #[test]
    fn transaction_commits_on_ok() {
        let mut db = Database::open_in_memory().unwrap();
        let post = Post::new("kept", "alice");

        db.transaction(|tx| -> Result<()> {
            tx.put_post(&post)?;
            Ok(())
        })
        .unwrap();

        assert!(db.get_post(post.id).unwrap().is_some());
    }

    #[test]
    fn transaction_rolls_back_on_err() {
        let mut db = Database::open_in_memory().unwrap();
        let post = Post::new("discarded", "alice");

        let res = db.transaction(|tx| -> Result<()> {
            tx.put_post(&post)?;
            Err(StoreError::Migration("forced".into()))
        });

        assert!(res.is_err());
        assert!(db.get_post(post.id).unwrap().is_none());
    }
}
