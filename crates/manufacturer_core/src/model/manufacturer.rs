//! Manufacturer domain model.
//!
//! # Responsibility
//! - Define the manufacturer record exchanged with the repository layer.
//! - Provide a read model that exposes soft-delete tombstone state.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on create.
//! - Once assigned, `id` is never reused for another manufacturer.
//! - Tombstone state lives in storage only; callers see it through
//!   `StoredManufacturer`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-generated identifier of a persisted manufacturer.
pub type ManufacturerId = i64;

/// Manufacturer entity as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    /// Assigned by the store on create; `None` for unsaved entities.
    pub id: Option<ManufacturerId>,
    pub name: String,
    pub country: String,
}

impl Manufacturer {
    /// Creates an unsaved manufacturer.
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            country: country.into(),
        }
    }

    /// Creates a manufacturer that refers to an already persisted row.
    ///
    /// Used to build update requests for a known id.
    pub fn with_id(
        id: ManufacturerId,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            country: country.into(),
        }
    }

    /// Returns whether the store has assigned an id to this entity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Display for Manufacturer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "manufacturer(id={id}"),
            None => write!(f, "manufacturer(id=none"),
        }?;
        write!(f, ", name={}, country={})", self.name, self.country)
    }
}

/// Manufacturer row read with the soft-delete filter ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredManufacturer {
    #[serde(flatten)]
    pub manufacturer: Manufacturer,
    /// Soft delete tombstone.
    pub is_deleted: bool,
}

impl StoredManufacturer {
    /// Returns whether this row is visible to the regular read paths.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}
