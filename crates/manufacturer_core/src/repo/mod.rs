//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repository APIs report absence as `None`/`false` and every lower-level
//!   failure as `DataProcessingError`.

pub mod manufacturer_repo;
