use sticky_core::{Filter, Task, TaskId, TaskValidationError};

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task = Task {
        id: TaskId::from("1700000000000_a1b2c3"),
        text: "buy milk".to_string(),
        completed: true,
        created_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "1700000000000_a1b2c3");
    assert_eq!(json["text"], "buy milk");
    assert_eq!(json["completed"], true);
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert!(json.get("created_at").is_none());

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn validate_rejects_records_built_outside_constructor() {
    let mut task = Task::new("write report").unwrap();
    task.validate().unwrap();

    task.text = "  ".to_string();
    assert_eq!(task.validate().unwrap_err(), TaskValidationError::EmptyText);

    task.text = "ok".to_string();
    task.id = TaskId::from("");
    assert_eq!(task.validate().unwrap_err(), TaskValidationError::EmptyId);
}

#[test]
fn toggle_twice_restores_flag() {
    let mut task = Task::new("walk dog").unwrap();
    task.toggle();
    assert!(task.completed);
    task.toggle();
    assert!(!task.completed);
}

#[test]
fn filter_matches_by_completion() {
    let mut task = Task::new("laundry").unwrap();
    assert!(Filter::All.matches(&task));
    assert!(Filter::Active.matches(&task));
    assert!(!Filter::Completed.matches(&task));

    task.toggle();
    assert!(Filter::All.matches(&task));
    assert!(!Filter::Active.matches(&task));
    assert!(Filter::Completed.matches(&task));
}

#[test]
fn filter_names_round_trip_through_display() {
    for filter in Filter::ALL {
        assert_eq!(filter.to_string().parse::<Filter>().unwrap(), filter);
    }
    assert_eq!(Filter::default(), Filter::All);
}
