//! Store configuration.
//!
//! # Responsibility
//! - Describe where the manufacturer database lives and how connections wait on locks.
//! - Stay deserializable so hosts can embed it in their own config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DB_FILE_NAME: &str = "manufacturers.sqlite3";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Settings used by `FileConnectionProvider` for every acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file; created on first open.
    pub db_path: PathBuf,
    /// How long a connection waits on a locked database before failing.
    pub busy_timeout_ms: u64,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DB_FILE_NAME};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn default_points_at_local_database_file() {
        let config = StoreConfig::default();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.busy_timeout(), Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS));
    }

    #[test]
    fn builder_overrides_busy_timeout() {
        let config = StoreConfig::new("/tmp/store.db").with_busy_timeout_ms(250);
        assert_eq!(config.db_path, PathBuf::from("/tmp/store.db"));
        assert_eq!(config.busy_timeout(), Duration::from_millis(250));
    }
}
