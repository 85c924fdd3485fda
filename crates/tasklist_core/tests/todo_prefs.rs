use rusqlite::Connection;
use tasklist_core::db::migrations::latest_version;
use tasklist_core::db::open_db_in_memory;
use tasklist_core::{PrefsTodoRepository, RepoError, Todo, TodoRepository, TodoStatus, TODOS_KEY};
use uuid::Uuid;

#[test]
fn save_and_load_roundtrip_preserves_fields_and_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = PrefsTodoRepository::try_new(&conn).unwrap();

    let mut first = Todo::with_id(Uuid::new_v4(), "Buy milk", 1_700_000_000_000);
    first.description = "two liters".to_string();
    let mut second = Todo::with_id(Uuid::new_v4(), "Water plants", 1_700_000_360_000);
    second.status = TodoStatus::Completed;
    let todos = vec![first, second];

    repo.save(&todos);

    assert_eq!(repo.load(), todos);
}

#[test]
fn load_returns_empty_list_when_key_is_absent() {
    let conn = open_db_in_memory().unwrap();
    let repo = PrefsTodoRepository::try_new(&conn).unwrap();

    assert!(repo.load().is_empty());
}

#[test]
fn load_returns_empty_list_for_undecodable_blob() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO prefs (key, value) VALUES (?1, ?2);",
        rusqlite::params![TODOS_KEY, b"not json".to_vec()],
    )
    .unwrap();

    let repo = PrefsTodoRepository::try_new(&conn).unwrap();
    assert!(repo.load().is_empty());
}

#[test]
fn decode_is_all_or_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = PrefsTodoRepository::try_new(&conn).unwrap();

    let valid = Todo::with_id(Uuid::new_v4(), "kept", 0);
    repo.save(std::slice::from_ref(&valid));

    // A list whose second element is malformed must not yield the first one.
    let blob = format!(
        "[{},{{\"id\":\"not-a-uuid\"}}]",
        serde_json::to_string(&valid).unwrap()
    );
    conn.execute(
        "UPDATE prefs SET value = ?1 WHERE key = ?2;",
        rusqlite::params![blob.into_bytes(), TODOS_KEY],
    )
    .unwrap();

    assert!(repo.load().is_empty());
}

#[test]
fn save_replaces_the_previous_blob_wholesale() {
    let conn = open_db_in_memory().unwrap();
    let repo = PrefsTodoRepository::try_new(&conn).unwrap();

    let first = vec![Todo::with_id(Uuid::new_v4(), "old", 0)];
    repo.save(&first);

    let second = vec![
        Todo::with_id(Uuid::new_v4(), "new a", 1),
        Todo::with_id(Uuid::new_v4(), "new b", 2),
    ];
    repo.save(&second);

    assert_eq!(repo.load(), second);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM prefs;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn saving_an_empty_list_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = PrefsTodoRepository::try_new(&conn).unwrap();

    repo.save(&[Todo::with_id(Uuid::new_v4(), "gone soon", 0)]);
    repo.save(&[]);

    assert!(repo.load().is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = PrefsTodoRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_prefs_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = PrefsTodoRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("prefs"))));
}
