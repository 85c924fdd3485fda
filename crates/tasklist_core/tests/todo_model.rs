use tasklist_core::{EditTarget, Todo, TodoStatus};
use uuid::Uuid;

#[test]
fn draft_sets_defaults() {
    let draft = Todo::draft(1_700_000_000_000);

    assert!(!draft.id.is_nil());
    assert_eq!(draft.title, "");
    assert_eq!(draft.description, "");
    assert_eq!(draft.due_at, 1_700_000_000_000);
    assert_eq!(draft.status, TodoStatus::Pending);
    assert!(!draft.has_title());
}

#[test]
fn drafts_never_share_an_id() {
    let first = Todo::draft(0);
    let second = Todo::draft(0);

    assert_ne!(first.id, second.id);
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut todo = Todo::with_id(id, "Buy milk", 1_700_000_000_000);
    todo.description = "two liters".to_string();
    todo.status = TodoStatus::Completed;

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "Buy milk");
    assert_eq!(json["description"], "two liters");
    assert_eq!(json["due_at"], 1_700_000_000_000_i64);
    assert_eq!(json["status"], "completed");

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn status_labels_are_capitalized() {
    assert_eq!(TodoStatus::Pending.label(), "Pending");
    assert_eq!(TodoStatus::Completed.label(), "Completed");
}

#[test]
fn edit_target_defaults_to_none() {
    assert_eq!(EditTarget::default(), EditTarget::None);

    let id = Uuid::new_v4();
    match EditTarget::Editing(id) {
        EditTarget::Editing(editing) => assert_eq!(editing, id),
        EditTarget::None => panic!("expected editing state"),
    }
}
