//! The seam the per-collection helpers hang off.
//!
//! [`UserStore`](crate::UserStore), [`PostStore`](crate::PostStore) and
//! [`CommentStore`](crate::CommentStore) are blanket-implemented for every
//! [`Storage`], so the same get/put/delete/scan calls work on a [`Database`]
//! and on the [`StoreTx`] handed out by [`Database::transaction`].

use rusqlite::{Connection, Transaction};

use crate::database::Database;
use crate::error::Result;

/// Anything that can hand out a connection to run statements on.
pub trait Storage {
    fn conn(&self) -> &Connection;
}

impl Storage for Database {
    fn conn(&self) -> &Connection {
        Database::conn(self)
    }
}

/// An open transaction.  Dropping it without committing rolls back.
pub struct StoreTx<'a> {
    tx: Transaction<'a>,
}

impl<'a> StoreTx<'a> {
    pub(crate) fn new(tx: Transaction<'a>) -> Self {
        Self { tx }
    }

    pub(crate) fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }
}

impl Storage for StoreTx<'_> {
    fn conn(&self) -> &Connection {
        &self.tx
    }
}
