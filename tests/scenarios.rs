//! End-to-end board scenarios driven through the public API.

use serde_json::json;
use std::str::FromStr;
use taskboard_core::domain::ordering::{add_task, move_across_columns, reorder_within_column, tasks_of_column};
use taskboard_core::{
    BoardConfig, BoardEvent, BoardSnapshot, ColumnId, DragController, DragState, DropOutcome,
    KanbanBoard, MemoryHost, SlotKey, Task, TaskId,
};

fn col(id: &str) -> ColumnId {
    ColumnId::from_str(id).expect("valid column id")
}

fn ordered(snapshot: &BoardSnapshot, column: &str) -> Vec<(String, Option<f64>)> {
    tasks_of_column(snapshot, &col(column))
        .iter()
        .map(|task| (task.id.to_string(), task.order))
        .collect()
}

fn snapshot() -> BoardSnapshot {
    BoardSnapshot::from_host_values(
        &json!([
            {"id": "backlog", "title": "Backlog", "color": "#e53e3e"},
            {"id": "todo", "title": "Todo", "color": "#ecc94b"},
            {"id": "done", "title": "Done", "color": "#48bb78"}
        ]),
        &json!([
            {"id": "T1", "content": "First", "columnId": "todo", "order": 0, "logs": []},
            {"id": "T2", "content": "Second", "columnId": "todo", "order": 1, "logs": []},
            {"id": "D1", "content": "Finished", "columnId": "done", "order": 0, "logs": []}
        ]),
    )
}

#[test]
fn scenario_a_reorder_within_column() {
    let s = snapshot();

    let next = reorder_within_column(&s, &col("todo"), 0, 1);

    assert_eq!(
        ordered(&next, "todo"),
        vec![("T2".to_string(), Some(0.0)), ("T1".to_string(), Some(1.0))]
    );
}

#[test]
fn scenario_b_move_across_columns() {
    let s = snapshot();
    let t1 = TaskId::from_str("T1").expect("valid task id");

    let next = move_across_columns(&s, &t1, &col("todo"), &col("done"), Some(0));

    assert_eq!(
        ordered(&next, "done"),
        vec![("T1".to_string(), Some(0.0)), ("D1".to_string(), Some(1.0))]
    );
    assert!(ordered(&next, "todo").iter().all(|(id, _)| id != "T1"));
}

#[test]
fn scenario_c_add_to_empty_column() {
    let s = snapshot();

    let (next, task) = add_task(&s, &col("backlog"), "New task", None).expect("column exists");

    let backlog: Vec<&Task> = tasks_of_column(&next, &col("backlog"));
    assert_eq!(backlog.len(), 1);
    assert_eq!(backlog[0].id, task.id);
    assert_eq!(backlog[0].order, Some(0.0));
}

#[test]
fn scenario_d_drop_without_target() {
    let s = snapshot();
    let before = serde_json::to_vec(&s).expect("serialize");
    let mut drag = DragController::new();
    assert!(drag.start(&s, &SlotKey::card(col("todo"), 0)));

    let outcome = drag.end(&s, None);

    assert_eq!(outcome, DropOutcome::NoTarget);
    assert_eq!(serde_json::to_vec(&s).expect("serialize"), before);

    // Same through the widget: nothing reaches the host.
    let mut board = KanbanBoard::new(BoardConfig::default(), s.clone(), MemoryHost::new());
    board.drag_start("todo-0");
    board.drag_over(None);
    assert_eq!(board.drag_end(None), DropOutcome::NoTarget);
    assert_eq!(serde_json::to_vec(board.snapshot()).expect("serialize"), before);
    assert_eq!(board.host().commits(), 0);
}

#[test]
fn scenario_e_task_deleted_mid_drag() {
    let s = snapshot();
    let mut drag = DragController::new();
    assert!(drag.start(&s, &SlotKey::card(col("todo"), 0)));

    let mut deleted = s.clone();
    deleted.tasks.retain(|task| task.id.as_str() != "T1");
    let deleted_before = deleted.clone();

    let outcome = drag.end(&deleted, Some(&SlotKey::card(col("done"), 0)));

    assert_eq!(outcome, DropOutcome::Stale);
    assert_eq!(drag.state(), &DragState::Idle);
    assert_eq!(deleted, deleted_before);
}

#[test]
fn stale_start_is_ignored() {
    let s = snapshot();
    let mut drag = DragController::new();

    assert!(!drag.start(&s, &SlotKey::card(col("todo"), 2)));
    assert_eq!(drag.state(), &DragState::Idle);
}

#[test]
fn full_session_with_host() {
    let mut board = KanbanBoard::new(BoardConfig::default(), snapshot(), MemoryHost::new());

    let created = board.add_task(&col("backlog")).expect("column exists");
    assert!(board.drag_start("backlog-0"));
    board.drag_over(Some("todo-1"));
    assert!(board.view().column(&col("todo")).expect("todo column").is_drag_over);
    assert!(matches!(board.drag_end(Some("todo-1")), DropOutcome::Moved(_)));

    assert_eq!(
        ordered(board.snapshot(), "todo"),
        vec![
            ("T1".to_string(), Some(0.0)),
            (created.id.to_string(), Some(1.0)),
            ("T2".to_string(), Some(2.0)),
        ]
    );

    assert!(board.begin_edit(&created.id));
    board.edit_input("Chase invoice");
    assert!(board.commit_edit());
    assert!(board.click_task(&created.id));

    let host = board.into_host();
    assert_eq!(
        host.notifications(),
        &[BoardEvent::Create, BoardEvent::Edit, BoardEvent::Click]
    );
    let last = host.last_task_event().expect("event recorded");
    assert_eq!(last.kind, BoardEvent::Click);
    assert_eq!(last.task.content, "Chase invoice");
    assert_eq!(host.commits(), 3);

    let stored = host.tasks().expect("tasks written");
    assert_eq!(stored.len(), 4);
    assert!(stored
        .iter()
        .any(|task| task.id == created.id && task.column_id == col("todo")));
}

#[test]
fn malformed_host_state_degrades() {
    let board = KanbanBoard::from_host_values(
        BoardConfig::from_host_settings(&json!("not settings")),
        &json!({"columns": "nope"}),
        &json!([null, {"id": "x"}, {"id": "ok", "content": "Fine", "columnId": "todo"}]),
        MemoryHost::new(),
    );

    let view = board.view();
    assert_eq!(view.columns.len(), 4);
    assert_eq!(view.title, "Kanban Board");
    let todo = view.column(&col("todo")).expect("default todo column");
    assert_eq!(todo.task_count, 1);
    assert_eq!(todo.cards[0].key, "todo-0");
}
