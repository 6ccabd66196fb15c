use rusqlite::Connection;
use sticky_core::db::{open_db, open_db_in_memory, DbError, SCHEMA_VERSION};
use sticky_core::{KeyValueStore, SqliteKvStore, DEFAULT_TASKS_KEY};

const STORED_TASKS: &str =
    r#"[{"id":"1700000000000_ab12","text":"buy milk","completed":false,"createdAt":1700000000000}]"#;

#[test]
fn fresh_database_is_stamped_and_has_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    let columns = kv_columns(&conn);
    assert_eq!(columns, vec!["key".to_string(), "value".to_string()]);
}

#[test]
fn stored_task_json_survives_reopen_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sticky.db");

    let conn = open_db(&path).unwrap();
    SqliteKvStore::new(&conn)
        .set(DEFAULT_TASKS_KEY, STORED_TASKS)
        .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    let loaded = SqliteKvStore::new(&conn).get(DEFAULT_TASKS_KEY).unwrap();
    assert_eq!(loaded.as_deref(), Some(STORED_TASKS));
}

#[test]
fn unstamped_file_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    drop(Connection::open(&path).unwrap());

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
}

#[test]
fn newer_schema_version_is_refused_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::NewerSchema { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 999);
    assert!(kv_columns(&conn).is_empty());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn kv_columns(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info(kv_entries);").unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}
