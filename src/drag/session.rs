//! Drag session controller.
//!
//! ```text
//! Idle --start--> Dragging --over--> Dragging
//!                 Dragging --end/cancel--> Idle
//! ```
//!
//! The controller never mutates a snapshot. On drop it asks
//! [`crate::domain::ordering`] for the next snapshot and hands it back inside
//! [`DropOutcome`]; the caller decides whether to commit it.

use crate::domain::board::{BoardSnapshot, ColumnId};
use crate::domain::ordering::{self, tasks_of_column};
use crate::domain::slot::SlotKey;
use crate::domain::task::Task;

/// State of the in-flight gesture
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Copy of the dragged task taken at drag start
        active: Task,
        /// Slot the drag started from
        source: SlotKey,
        /// Column currently under the pointer, for highlighting only
        hover_column: Option<ColumnId>,
    },
}

/// Result of ending a drag
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Card moved inside its column
    Reordered(BoardSnapshot),
    /// Card moved to another column
    Moved(BoardSnapshot),
    /// Released outside every drop target
    NoTarget,
    /// The dragged task no longer exists in the snapshot
    Stale,
    /// Target column is not part of the board
    UnknownTarget,
    /// No drag was in progress
    NotDragging,
}

impl DropOutcome {
    /// The snapshot to commit, if the drop changed anything
    pub fn snapshot(&self) -> Option<&BoardSnapshot> {
        match self {
            Self::Reordered(snapshot) | Self::Moved(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn into_snapshot(self) -> Option<BoardSnapshot> {
        match self {
            Self::Reordered(snapshot) | Self::Moved(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Tracks one drag gesture at a time
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn active_task(&self) -> Option<&Task> {
        match &self.state {
            DragState::Dragging { active, .. } => Some(active),
            DragState::Idle => None,
        }
    }

    pub fn source(&self) -> Option<&SlotKey> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    pub fn hover_column(&self) -> Option<&ColumnId> {
        match &self.state {
            DragState::Dragging { hover_column, .. } => hover_column.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Starts a drag from `source`
    ///
    /// Returns `false` and stays put when a drag is already running or the
    /// key does not resolve to a task in the current snapshot.
    pub fn start(&mut self, snapshot: &BoardSnapshot, source: &SlotKey) -> bool {
        if self.is_dragging() {
            tracing::debug!(source = %source, "drag start ignored, already dragging");
            return false;
        }

        let Some(active) = resolve(snapshot, source) else {
            tracing::debug!(source = %source, "drag start ignored, stale source key");
            return false;
        };

        tracing::debug!(source = %source, task_id = %active.id, "drag started");
        self.state = DragState::Dragging {
            hover_column: Some(active.column_id.clone()),
            active: active.clone(),
            source: source.clone(),
        };
        true
    }

    /// Records the target currently under the pointer
    pub fn over(&mut self, snapshot: &BoardSnapshot, target: Option<&SlotKey>) {
        let DragState::Dragging { hover_column, .. } = &mut self.state else {
            return;
        };

        let next = target
            .map(|key| &key.column_id)
            .filter(|column_id| snapshot.has_column(column_id))
            .cloned();

        if *hover_column != next {
            tracing::debug!(hover_column = ?next.as_ref().map(ColumnId::as_str), "drag hover changed");
            *hover_column = next;
        }
    }

    /// Ends the drag and computes the resulting snapshot
    ///
    /// The controller is `Idle` afterwards whatever the outcome.
    pub fn end(&mut self, snapshot: &BoardSnapshot, target: Option<&SlotKey>) -> DropOutcome {
        let DragState::Dragging { active, source, .. } = std::mem::take(&mut self.state) else {
            return DropOutcome::NotDragging;
        };

        let Some(target) = target else {
            tracing::debug!(task_id = %active.id, "drop without target, cancelled");
            return DropOutcome::NoTarget;
        };

        // Prefer the decoded source slot; fall back to the task id when the
        // snapshot shifted underneath the gesture.
        let located = match resolve(snapshot, &source) {
            Some(task) if task.id == active.id => {
                source.index.map(|index| (source.column_id.clone(), index))
            }
            _ => ordering::position_in_column(snapshot, &active.id),
        };
        let Some((from_column, from_index)) = located else {
            tracing::debug!(task_id = %active.id, "drop ignored, dragged task is gone");
            return DropOutcome::Stale;
        };

        if !snapshot.has_column(&target.column_id) {
            tracing::debug!(target = %target, "drop ignored, unknown target column");
            return DropOutcome::UnknownTarget;
        }

        if from_column == target.column_id {
            let to_index = target
                .index
                .unwrap_or_else(|| tasks_of_column(snapshot, &from_column).len());
            tracing::debug!(
                task_id = %active.id,
                column_id = %from_column,
                from_index,
                to_index,
                "drop reorders within column"
            );
            DropOutcome::Reordered(ordering::reorder_within_column(
                snapshot,
                &from_column,
                from_index,
                to_index,
            ))
        } else {
            tracing::debug!(
                task_id = %active.id,
                from = %from_column,
                to = %target.column_id,
                index = ?target.index,
                "drop moves across columns"
            );
            DropOutcome::Moved(ordering::move_across_columns(
                snapshot,
                &active.id,
                &from_column,
                &target.column_id,
                target.index,
            ))
        }
    }

    /// Abandons the drag without touching any data
    pub fn cancel(&mut self) {
        if let DragState::Dragging { active, .. } = std::mem::take(&mut self.state) {
            tracing::debug!(task_id = %active.id, "drag cancelled");
        }
    }
}

/// Task occupying an indexed slot in the current snapshot
fn resolve<'a>(snapshot: &'a BoardSnapshot, key: &SlotKey) -> Option<&'a Task> {
    let index = key.index?;
    tasks_of_column(snapshot, &key.column_id).get(index).copied()
}
