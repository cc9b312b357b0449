use manufacturer_core::db::migrations::latest_version;
use manufacturer_core::db::{
    ensure_schema_ready, open_db, open_db_in_memory, ConnectionProvider, DbError,
    FileConnectionProvider, SharedMemoryProvider,
};
use manufacturer_core::StoreConfig;
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "manufacturers");
    ensure_schema_ready(&conn).unwrap();
}

#[test]
fn new_rows_default_to_not_deleted() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO manufacturers (name, country) VALUES ('Fiat', 'Italy');",
        [],
    )
    .unwrap();

    let is_deleted: i64 = conn
        .query_row("SELECT is_deleted FROM manufacturers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(is_deleted, 0);
}

#[test]
fn schema_rejects_non_boolean_tombstone() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO manufacturers (name, country, is_deleted) VALUES ('Fiat', 'Italy', 2);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manufacturers.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "manufacturers");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn file_provider_hands_out_migrated_connections() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FileConnectionProvider::new(
        StoreConfig::new(dir.path().join("provider.sqlite3")).with_busy_timeout_ms(250),
    );

    let conn = provider.acquire().unwrap();
    ensure_schema_ready(&conn).unwrap();
    assert_eq!(provider.config().busy_timeout_ms, 250);
}

#[test]
fn shared_memory_providers_are_isolated_from_each_other() {
    let first = SharedMemoryProvider::new().unwrap();
    let second = SharedMemoryProvider::new().unwrap();

    first
        .acquire()
        .unwrap()
        .execute(
            "INSERT INTO manufacturers (name, country) VALUES ('Seat', 'Spain');",
            [],
        )
        .unwrap();

    assert_eq!(row_count(&first.acquire().unwrap()), 1);
    assert_eq!(row_count(&second.acquire().unwrap()), 0);
}

fn row_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM manufacturers;", [], |row| row.get(0))
        .unwrap()
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
