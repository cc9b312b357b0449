//! Manufacturer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide soft-delete CRUD over the `manufacturers` table.
//! - Keep SQL text and row mapping inside the persistence boundary.
//!
//! # Invariants
//! - Every call acquires its own connection and releases it before returning.
//! - Soft-deleted rows never surface through `get`/`get_all`/`update`/`delete`.
//! - "Not found" is reported as `None`/`false`, never as an error.

use crate::db::{ensure_schema_ready, ConnectionProvider, DbError, DbResult};
use crate::model::manufacturer::{Manufacturer, ManufacturerId, StoredManufacturer};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const MANUFACTURER_SELECT_SQL: &str = "SELECT id, name, country FROM manufacturers";
const STORED_MANUFACTURER_SELECT_SQL: &str =
    "SELECT id, name, country, is_deleted FROM manufacturers";
const MANUFACTURER_INSERT_SQL: &str =
    "INSERT INTO manufacturers (name, country) VALUES (?1, ?2) RETURNING id;";
const MANUFACTURER_UPDATE_SQL: &str = "UPDATE manufacturers SET name = ?1, country = ?2";
const MANUFACTURER_TOMBSTONE_SQL: &str = "UPDATE manufacturers SET is_deleted = 1";
const MANUFACTURER_RESTORE_SQL: &str = "UPDATE manufacturers SET is_deleted = 0";
const MANUFACTURER_COUNT_SQL: &str = "SELECT COUNT(*) FROM manufacturers";

pub type RepoResult<T> = Result<T, DataProcessingError>;

/// Failure of a repository operation.
///
/// `message` names the operation and the entity or id involved; the
/// lower-level cause is available through `source()`.
#[derive(Debug)]
pub struct DataProcessingError {
    message: String,
    source: DbError,
}

impl DataProcessingError {
    pub fn new(message: impl Into<String>, source: impl Into<DbError>) -> Self {
        Self {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &DbError {
        &self.source
    }
}

impl Display for DataProcessingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for DataProcessingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Which rows a statement may touch with respect to the tombstone flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowScope {
    Active,
    Deleted,
    Any,
}

impl RowScope {
    fn predicate(self) -> Option<&'static str> {
        match self {
            Self::Active => Some("is_deleted = 0"),
            Self::Deleted => Some("is_deleted = 1"),
            Self::Any => None,
        }
    }
}

/// Builds `statement WHERE condition AND <scope predicate>`.
fn scoped_sql(statement: &str, condition: Option<&str>, scope: RowScope) -> String {
    let clauses = condition
        .into_iter()
        .chain(scope.predicate())
        .collect::<Vec<_>>();

    if clauses.is_empty() {
        format!("{statement};")
    } else {
        format!("{statement} WHERE {};", clauses.join(" AND "))
    }
}

/// Repository interface for manufacturer CRUD operations.
pub trait ManufacturerRepository {
    /// Inserts the manufacturer and writes the store-generated id back onto it.
    fn create(&self, manufacturer: Manufacturer) -> RepoResult<Manufacturer>;
    /// Gets one non-deleted manufacturer by id.
    fn get(&self, id: ManufacturerId) -> RepoResult<Option<Manufacturer>>;
    /// Lists every non-deleted manufacturer in store order.
    fn get_all(&self) -> RepoResult<Vec<Manufacturer>>;
    /// Updates name and country of a non-deleted row; returns the input unchanged.
    fn update(&self, manufacturer: Manufacturer) -> RepoResult<Manufacturer>;
    /// Soft-deletes a row. Returns `false` when nothing was active under `id`.
    fn delete(&self, id: ManufacturerId) -> RepoResult<bool>;
    /// Gets one row regardless of its tombstone flag.
    fn get_including_deleted(&self, id: ManufacturerId)
        -> RepoResult<Option<StoredManufacturer>>;
    /// Clears the tombstone flag. Returns `false` when no deleted row matched.
    fn restore(&self, id: ManufacturerId) -> RepoResult<bool>;
    /// Counts non-deleted rows.
    fn count_active(&self) -> RepoResult<u64>;
}

/// SQLite-backed manufacturer repository.
pub struct SqliteManufacturerRepository<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteManufacturerRepository<P> {
    /// Wraps a provider whose connections are already migrated.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Wraps a provider after checking that its connections carry the expected schema.
    pub fn try_new(provider: P) -> RepoResult<Self> {
        let conn = provider.acquire().map_err(|err| {
            DataProcessingError::new("can't acquire connection for schema check", err)
        })?;
        ensure_schema_ready(&conn)
            .map_err(|err| DataProcessingError::new("manufacturer schema is not ready", err))?;
        drop(conn);
        Ok(Self::new(provider))
    }

    fn with_connection<T>(
        &self,
        event: &'static str,
        describe: impl FnOnce() -> String,
        body: impl FnOnce(&Connection) -> DbResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = self.provider.acquire().and_then(|conn| body(&conn));

        match result {
            Ok(value) => {
                debug!(
                    "event={} module=repo status=ok duration_ms={}",
                    event,
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                error!(
                    "event={} module=repo status=error duration_ms={} error={}",
                    event,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(DataProcessingError::new(describe(), err))
            }
        }
    }
}

impl<P: ConnectionProvider> ManufacturerRepository for SqliteManufacturerRepository<P> {
    fn create(&self, mut manufacturer: Manufacturer) -> RepoResult<Manufacturer> {
        let generated_id = self.with_connection(
            "manufacturer_create",
            || format!("can't insert {manufacturer}"),
            |conn| {
                let id = conn
                    .query_row(
                        MANUFACTURER_INSERT_SQL,
                        params![manufacturer.name, manufacturer.country],
                        |row| row.get::<_, ManufacturerId>(0),
                    )
                    .optional()?;
                Ok(id)
            },
        )?;

        if let Some(id) = generated_id {
            manufacturer.id = Some(id);
        }
        Ok(manufacturer)
    }

    fn get(&self, id: ManufacturerId) -> RepoResult<Option<Manufacturer>> {
        self.with_connection(
            "manufacturer_get",
            || format!("can't get manufacturer by id {id}"),
            |conn| {
                let sql = scoped_sql(MANUFACTURER_SELECT_SQL, Some("id = ?1"), RowScope::Active);
                let mut stmt = conn.prepare(&sql)?;
                let mut rows = stmt.query([id])?;
                if let Some(row) = rows.next()? {
                    return Ok(Some(parse_manufacturer_row(row)?));
                }
                Ok(None)
            },
        )
    }

    fn get_all(&self) -> RepoResult<Vec<Manufacturer>> {
        self.with_connection(
            "manufacturer_list",
            || "can't get all manufacturers".to_string(),
            |conn| {
                let sql = scoped_sql(MANUFACTURER_SELECT_SQL, None, RowScope::Active);
                let mut stmt = conn.prepare(&sql)?;
                let mut rows = stmt.query([])?;
                let mut manufacturers = Vec::new();

                while let Some(row) = rows.next()? {
                    manufacturers.push(parse_manufacturer_row(row)?);
                }

                Ok(manufacturers)
            },
        )
    }

    fn update(&self, manufacturer: Manufacturer) -> RepoResult<Manufacturer> {
        let changed = self.with_connection(
            "manufacturer_update",
            || format!("can't update {manufacturer}"),
            |conn| {
                let sql = scoped_sql(MANUFACTURER_UPDATE_SQL, Some("id = ?3"), RowScope::Active);
                let changed = conn.execute(
                    &sql,
                    params![manufacturer.name, manufacturer.country, manufacturer.id],
                )?;
                Ok(changed)
            },
        )?;

        if changed == 0 {
            debug!("event=manufacturer_update module=repo status=noop rows_affected=0");
        }
        Ok(manufacturer)
    }

    fn delete(&self, id: ManufacturerId) -> RepoResult<bool> {
        self.with_connection(
            "manufacturer_delete",
            || format!("can't delete manufacturer by id {id}"),
            |conn| {
                let sql = scoped_sql(MANUFACTURER_TOMBSTONE_SQL, Some("id = ?1"), RowScope::Active);
                let changed = conn.execute(&sql, [id])?;
                Ok(changed > 0)
            },
        )
    }

    fn get_including_deleted(
        &self,
        id: ManufacturerId,
    ) -> RepoResult<Option<StoredManufacturer>> {
        self.with_connection(
            "manufacturer_get_stored",
            || format!("can't get stored manufacturer by id {id}"),
            |conn| {
                let sql =
                    scoped_sql(STORED_MANUFACTURER_SELECT_SQL, Some("id = ?1"), RowScope::Any);
                let stored = conn.query_row(&sql, [id], parse_stored_row).optional()?;
                Ok(stored)
            },
        )
    }

    fn restore(&self, id: ManufacturerId) -> RepoResult<bool> {
        self.with_connection(
            "manufacturer_restore",
            || format!("can't restore manufacturer by id {id}"),
            |conn| {
                let sql = scoped_sql(MANUFACTURER_RESTORE_SQL, Some("id = ?1"), RowScope::Deleted);
                let changed = conn.execute(&sql, [id])?;
                Ok(changed > 0)
            },
        )
    }

    fn count_active(&self) -> RepoResult<u64> {
        self.with_connection(
            "manufacturer_count",
            || "can't count manufacturers".to_string(),
            |conn| {
                let sql = scoped_sql(MANUFACTURER_COUNT_SQL, None, RowScope::Active);
                let count = conn.query_row(&sql, [], |row| row.get::<_, i64>(0))?;
                Ok(u64::try_from(count).unwrap_or_default())
            },
        )
    }
}

/// Maps one `manufacturers` row to an entity by column name.
///
/// Pure: reads only from `row`, so it can be exercised against fixture rows.
pub fn parse_manufacturer_row(row: &Row<'_>) -> rusqlite::Result<Manufacturer> {
    Ok(Manufacturer {
        id: row.get("id")?,
        name: row.get("name")?,
        country: row.get("country")?,
    })
}

fn parse_stored_row(row: &Row<'_>) -> rusqlite::Result<StoredManufacturer> {
    Ok(StoredManufacturer {
        manufacturer: parse_manufacturer_row(row)?,
        is_deleted: row.get("is_deleted")?,
    })
}
