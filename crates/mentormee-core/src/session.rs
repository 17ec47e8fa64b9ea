//! Session tokens and the slot that keeps them across restarts.
//!
//! A token is issued on login, cleared on logout and read back on startup to
//! recover who is logged in.  The slot sits outside the database: a small
//! file next to it by default, or memory for tests.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mentormee_shared::SessionToken;
use mentormee_store::User;
use tracing::{debug, info};

/// Somewhere a single token string can be kept.
pub trait TokenSlot: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn store(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// Token kept in a file, surviving process restarts.
#[derive(Debug, Clone)]
pub struct FileTokenSlot {
    path: PathBuf,
}

impl FileTokenSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenSlot for FileTokenSlot {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => {
                let token = s.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Token kept in memory only.
#[derive(Debug, Default)]
pub struct MemoryTokenSlot {
    token: Mutex<Option<String>>,
}

impl MemoryTokenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|e| io::Error::other(format!("token slot lock poisoned: {e}")))
    }
}

impl TokenSlot for MemoryTokenSlot {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn store(&self, token: &str) -> io::Result<()> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Issues, recovers and clears the login token.
pub struct SessionContext {
    slot: Box<dyn TokenSlot>,
}

impl SessionContext {
    pub fn new(slot: impl TokenSlot + 'static) -> Self {
        Self {
            slot: Box::new(slot),
        }
    }

    /// A context whose token disappears with the process.
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenSlot::new())
    }

    /// Mint a `{email}-{uuid}` token for `user` and persist it, replacing any
    /// previous one.
    pub fn issue(&self, user: &User) -> io::Result<SessionToken> {
        let token = SessionToken::for_email(&user.email);
        self.slot.store(token.as_str())?;
        info!(email = %user.email, "session token issued");
        Ok(token)
    }

    /// The stored token, if any.
    pub fn token(&self) -> io::Result<Option<SessionToken>> {
        Ok(self.slot.load()?.map(SessionToken))
    }

    pub fn is_logged_in(&self) -> io::Result<bool> {
        Ok(self.token()?.is_some())
    }

    /// Email encoded in the stored token (text before the first `-`).
    pub fn recover_identity(&self) -> io::Result<Option<String>> {
        let email = self.token()?.map(|t| t.email_prefix().to_string());
        debug!(recovered = email.is_some(), "session identity recovered");
        Ok(email)
    }

    pub fn clear(&self) -> io::Result<()> {
        self.slot.clear()?;
        info!("session token cleared");
        Ok(())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}
