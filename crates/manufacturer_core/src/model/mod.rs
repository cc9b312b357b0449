//! Domain model for manufacturer records.
//!
//! # Responsibility
//! - Define the data structures shared by repository and CLI layers.
//!
//! # Invariants
//! - Every persisted manufacturer is identified by a store-generated id.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod manufacturer;
