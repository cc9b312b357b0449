//! Schema readiness checks for connections supplied by external providers.

use super::migrations::{current_user_version, latest_version};
use super::{DbError, DbResult};
use rusqlite::Connection;

pub const MANUFACTURERS_TABLE: &str = "manufacturers";
pub const REQUIRED_MANUFACTURER_COLUMNS: &[&str] = &["id", "name", "country", "is_deleted"];

/// Verifies that `conn` is migrated and carries the manufacturer table shape.
///
/// # Errors
/// - `UninitializedConnection` when `user_version` differs from the latest migration.
/// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema was altered.
pub fn ensure_schema_ready(conn: &Connection) -> DbResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(DbError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let columns = table_columns(conn, MANUFACTURERS_TABLE)?;
    if columns.is_empty() {
        return Err(DbError::MissingRequiredTable(MANUFACTURERS_TABLE));
    }

    for &column in REQUIRED_MANUFACTURER_COLUMNS {
        if !columns.iter().any(|existing| existing == column) {
            return Err(DbError::MissingRequiredColumn {
                table: MANUFACTURERS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
