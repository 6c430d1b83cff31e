//! Pure ordering operations over a [`BoardSnapshot`].
//!
//! Every function takes a snapshot by reference and returns a new one; the
//! input is never modified. Stale indices, unknown tasks and unknown target
//! columns turn the operation into a no-op that returns an unchanged copy.
//!
//! Tasks keep their position in `BoardSnapshot::tasks`; only `column_id` and
//! `order` change when cards move. After every mutation the touched columns
//! are ranked exactly `0..n`.

use crate::domain::board::{BoardSnapshot, ColumnId};
use crate::domain::task::{LogEntry, Task, TaskId};

/// Positions in `snapshot.tasks` of the column's tasks, in display order
///
/// Sorting is stable, so equal ranks keep their array order. Drag indices are
/// computed against exactly this order.
fn column_positions(snapshot: &BoardSnapshot, column_id: &ColumnId) -> Vec<usize> {
    let mut positions: Vec<usize> = snapshot
        .tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| &task.column_id == column_id)
        .map(|(position, _)| position)
        .collect();
    positions.sort_by(|&a, &b| {
        snapshot.tasks[a]
            .rank()
            .total_cmp(&snapshot.tasks[b].rank())
    });
    positions
}

/// Writes ranks `0..n` following the given display order
fn assign_ranks(tasks: &mut [Task], positions: &[usize]) {
    for (rank, &position) in positions.iter().enumerate() {
        tasks[position].order = Some(rank as f64);
    }
}

/// Ordered tasks of a column: ascending rank, ties by array position
pub fn tasks_of_column<'a>(snapshot: &'a BoardSnapshot, column_id: &ColumnId) -> Vec<&'a Task> {
    column_positions(snapshot, column_id)
        .into_iter()
        .map(|position| &snapshot.tasks[position])
        .collect()
}

/// Index of a task inside its column's ordered view
pub fn position_in_column(snapshot: &BoardSnapshot, task_id: &TaskId) -> Option<(ColumnId, usize)> {
    let task = snapshot.task(task_id)?;
    let index = tasks_of_column(snapshot, &task.column_id)
        .iter()
        .position(|t| &t.id == task_id)?;
    Some((task.column_id.clone(), index))
}

/// Checks that the column's ranks are exactly `0..n` in display order
pub fn column_is_normalized(snapshot: &BoardSnapshot, column_id: &ColumnId) -> bool {
    tasks_of_column(snapshot, column_id)
        .iter()
        .enumerate()
        .all(|(rank, task)| task.order == Some(rank as f64))
}

/// Renumbers a column to `0..n` without changing its display order
pub fn normalize_column(snapshot: &BoardSnapshot, column_id: &ColumnId) -> BoardSnapshot {
    let positions = column_positions(snapshot, column_id);
    let mut next = snapshot.clone();
    assign_ranks(&mut next.tasks, &positions);
    next
}

/// Moves the card at `from_index` to `to_index` within one column
///
/// `to_index` is clamped to the end of the column. An out-of-range
/// `from_index` means the caller holds a stale key and the snapshot is
/// returned unchanged.
pub fn reorder_within_column(
    snapshot: &BoardSnapshot,
    column_id: &ColumnId,
    from_index: usize,
    to_index: usize,
) -> BoardSnapshot {
    let mut positions = column_positions(snapshot, column_id);
    if from_index >= positions.len() {
        tracing::debug!(
            column_id = %column_id,
            from_index,
            len = positions.len(),
            "reorder ignored, stale source index"
        );
        return snapshot.clone();
    }

    let moved = positions.remove(from_index);
    let to_index = to_index.min(positions.len());
    positions.insert(to_index, moved);

    let mut next = snapshot.clone();
    assign_ranks(&mut next.tasks, &positions);
    next
}

/// Moves a task from one column into another
///
/// With `insert_index` the task lands at that index of the target column
/// (clamped to its length); without one it is appended. Both columns are
/// renumbered. Moving within the same column delegates to
/// [`reorder_within_column`].
pub fn move_across_columns(
    snapshot: &BoardSnapshot,
    task_id: &TaskId,
    from_column_id: &ColumnId,
    to_column_id: &ColumnId,
    insert_index: Option<usize>,
) -> BoardSnapshot {
    let mut source = column_positions(snapshot, from_column_id);
    let Some(from_index) = source
        .iter()
        .position(|&position| &snapshot.tasks[position].id == task_id)
    else {
        tracing::debug!(task_id = %task_id, column_id = %from_column_id, "move ignored, task not in source column");
        return snapshot.clone();
    };

    if !snapshot.has_column(to_column_id) {
        tracing::debug!(column_id = %to_column_id, "move ignored, unknown target column");
        return snapshot.clone();
    }

    if from_column_id == to_column_id {
        let to_index = insert_index.unwrap_or(source.len());
        return reorder_within_column(snapshot, from_column_id, from_index, to_index);
    }

    let moved = source.remove(from_index);
    let mut target = column_positions(snapshot, to_column_id);
    let insert_at = insert_index.unwrap_or(target.len()).min(target.len());
    target.insert(insert_at, moved);

    let mut next = snapshot.clone();
    next.tasks[moved].column_id = to_column_id.clone();
    assign_ranks(&mut next.tasks, &source);
    assign_ranks(&mut next.tasks, &target);
    next
}

/// Appends a new task to a column
///
/// Returns `None` when the column does not exist. The new task gets a fresh
/// id that is not present in the snapshot and the rank right after the
/// column's last task.
pub fn add_task(
    snapshot: &BoardSnapshot,
    column_id: &ColumnId,
    content: &str,
    seed_log: Option<LogEntry>,
) -> Option<(BoardSnapshot, Task)> {
    if !snapshot.has_column(column_id) {
        tracing::debug!(column_id = %column_id, "add ignored, unknown column");
        return None;
    }

    let mut id = TaskId::generate();
    while snapshot.task(&id).is_some() {
        id = TaskId::generate();
    }

    let mut next = normalize_column(snapshot, column_id);
    let order = tasks_of_column(&next, column_id).len() as f64;

    let mut task = Task::new(id, column_id.clone(), content).with_order(order);
    task.logs.extend(seed_log);

    next.tasks.push(task.clone());
    Some((next, task))
}

/// Replaces the content of one task, leaving everything else untouched
pub fn update_task_content(
    snapshot: &BoardSnapshot,
    task_id: &TaskId,
    content: &str,
) -> BoardSnapshot {
    let mut next = snapshot.clone();
    match next.tasks.iter_mut().find(|task| &task.id == task_id) {
        Some(task) => task.content = content.to_string(),
        None => tracing::debug!(task_id = %task_id, "update ignored, unknown task"),
    }
    next
}
