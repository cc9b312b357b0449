//! Connection providers consumed by repositories.
//!
//! # Responsibility
//! - Hand out one ready-to-use connection per repository call.
//! - Keep pooling/lifetime policy out of the repository layer.
//!
//! # Invariants
//! - Acquired connections are owned by the caller and closed on drop.
//! - Acquired connections have migrations applied.

use super::open::{open_db_uri, open_db_with_timeout};
use super::DbResult;
use crate::config::StoreConfig;
use log::info;
use rusqlite::Connection;
use std::sync::atomic::{AtomicU64, Ordering};

static SHARED_MEMORY_SEQ: AtomicU64 = AtomicU64::new(0);

/// Source of usable SQLite connections.
pub trait ConnectionProvider {
    /// Acquires a connection scoped to a single repository call.
    fn acquire(&self) -> DbResult<Connection>;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    fn acquire(&self) -> DbResult<Connection> {
        (**self).acquire()
    }
}

/// Opens a fresh connection to a database file on every acquisition.
#[derive(Debug, Clone)]
pub struct FileConnectionProvider {
    config: StoreConfig,
}

impl FileConnectionProvider {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl ConnectionProvider for FileConnectionProvider {
    fn acquire(&self) -> DbResult<Connection> {
        open_db_with_timeout(&self.config.db_path, self.config.busy_timeout())
    }
}

/// Named shared-cache in-memory database.
///
/// An anchor connection keeps the database alive; it disappears when the
/// provider is dropped.
pub struct SharedMemoryProvider {
    uri: String,
    _anchor: Connection,
}

impl SharedMemoryProvider {
    pub fn new() -> DbResult<Self> {
        let seq = SHARED_MEMORY_SEQ.fetch_add(1, Ordering::Relaxed);
        let uri = format!(
            "file:manufacturers-{}-{seq}?mode=memory&cache=shared",
            std::process::id()
        );
        let anchor = open_db_uri(&uri)?;
        info!("event=provider_init module=db status=ok mode=shared_memory seq={seq}");
        Ok(Self {
            uri,
            _anchor: anchor,
        })
    }
}

impl ConnectionProvider for SharedMemoryProvider {
    fn acquire(&self) -> DbResult<Connection> {
        open_db_uri(&self.uri)
    }
}
