//! Persistence core for manufacturer records.
//! Soft-delete CRUD over SQLite with connection-per-call acquisition.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::StoreConfig;
pub use db::{ConnectionProvider, DbError, FileConnectionProvider, SharedMemoryProvider};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::manufacturer::{Manufacturer, ManufacturerId, StoredManufacturer};
pub use repo::manufacturer_repo::{
    parse_manufacturer_row, DataProcessingError, ManufacturerRepository, RepoResult,
    SqliteManufacturerRepository,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
