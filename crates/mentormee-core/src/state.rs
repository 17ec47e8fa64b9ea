//! The [`Core`] handle shared by every operation.
//!
//! Reads take `&self`, writes take `&mut self`.  Callers that share a core
//! across threads wrap it in `Arc<Mutex<Core>>`.

use mentormee_store::Database;
use tracing::info;

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::session::{FileTokenSlot, SessionContext};

/// Database handle plus session slot.
#[derive(Debug)]
pub struct Core {
    pub(crate) db: Database,
    pub(crate) session: SessionContext,
}

impl Core {
    /// Assemble a core from already-open parts.
    pub fn new(db: Database, session: SessionContext) -> Self {
        Self { db, session }
    }

    /// Open the database and token file named by `config`.
    ///
    /// Fails with [`CoreError::StorageUnavailable`] if the database cannot be
    /// opened or migrated.
    pub fn open(config: &CoreConfig) -> Result<Self> {
        let db_path = config.db_path();
        let db = Database::open_at(&db_path).map_err(CoreError::StorageUnavailable)?;
        let session = SessionContext::new(FileTokenSlot::new(config.token_path()));

        info!(
            db = %db_path.display(),
            token = %config.token_path().display(),
            "core opened"
        );

        Ok(Self::new(db, session))
    }

    /// A core backed by an in-memory database and token slot.
    pub fn in_memory() -> Result<Self> {
        let db = Database::open_in_memory().map_err(CoreError::StorageUnavailable)?;
        Ok(Self::new(db, SessionContext::in_memory()))
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}
