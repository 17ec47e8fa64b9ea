//! Core configuration loaded from environment variables.
//!
//! All settings have defaults so the core can start with zero configuration.

use std::path::PathBuf;

use mentormee_shared::constants::{DB_FILE_NAME, TOKEN_FILE_NAME};

/// Where the database and the session token live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Directory holding both files.
    /// Env: `MENTORMEE_DATA_DIR`
    /// Default: the platform data directory (`~/.local/share/mentormee` on Linux).
    pub data_dir: PathBuf,

    /// Database file name inside `data_dir`.
    /// Env: `MENTORMEE_DB_FILE`
    /// Default: `mentormee.db`
    pub db_file: String,

    /// Session token file name inside `data_dir`.
    /// Env: `MENTORMEE_TOKEN_FILE`
    /// Default: `session.token`
    pub token_file: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let data_dir = mentormee_store::database::default_data_dir().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "No platform data directory, using ./.mentormee");
            PathBuf::from(".mentormee")
        });

        Self {
            data_dir,
            db_file: DB_FILE_NAME.to_string(),
            token_file: TOKEN_FILE_NAME.to_string(),
        }
    }
}

impl CoreConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Empty values are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = non_empty(&lookup, "MENTORMEE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(name) = non_empty(&lookup, "MENTORMEE_DB_FILE") {
            config.db_file = name;
        }

        if let Some(name) = non_empty(&lookup, "MENTORMEE_TOKEN_FILE") {
            config.token_file = name;
        }

        config
    }

    /// Same defaults, rooted at `dir`.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join(&self.token_file)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        tracing::warn!(key, "Empty configuration value, using default");
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_file_names() {
        let config = CoreConfig::default();
        assert_eq!(config.db_file, "mentormee.db");
        assert_eq!(config.token_file, "session.token");
    }

    #[test]
    fn test_lookup_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("MENTORMEE_DATA_DIR", "/tmp/mm"),
            ("MENTORMEE_DB_FILE", "social.db"),
        ]);
        let config = CoreConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.db_path(), PathBuf::from("/tmp/mm/social.db"));
        assert_eq!(config.token_path(), PathBuf::from("/tmp/mm/session.token"));
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = CoreConfig::from_lookup(|k| {
            (k == "MENTORMEE_TOKEN_FILE").then(|| "   ".to_string())
        });
        assert_eq!(config.token_file, "session.token");
    }
}
