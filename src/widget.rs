//! The board as one embeddable unit.
//!
//! [`KanbanBoard`] holds the latest snapshot handed over by the host, runs the
//! drag and edit state machines against it and writes every change back
//! through [`BoardHost`]. All calls are synchronous; each one either leaves
//! the snapshot alone or replaces it with a fully normalized one.

use crate::domain::board::{BoardConfig, BoardSnapshot, ColumnId};
use crate::domain::ordering::{self, tasks_of_column};
use crate::domain::slot::{self, SlotKey};
use crate::domain::task::{LogEntry, Task, TaskId};
use crate::drag::{BoardLayout, DragController, DropOutcome, PointerRelease, PointerSensor, SensorEvent};
use crate::host::{BoardEvent, BoardHost, TaskEvent};
use crate::view::{self, BoardView, CardEditor};
use kurbo::Point;
use serde_json::Value;

/// A kanban board bound to its host
#[derive(Debug)]
pub struct KanbanBoard<H: BoardHost> {
    config: BoardConfig,
    snapshot: BoardSnapshot,
    drag: DragController,
    sensor: PointerSensor,
    editor: CardEditor,
    host: H,
}

impl<H: BoardHost> KanbanBoard<H> {
    pub fn new(config: BoardConfig, snapshot: BoardSnapshot, host: H) -> Self {
        let sensor = PointerSensor::new(config.activation_distance);
        Self {
            config,
            snapshot,
            drag: DragController::new(),
            sensor,
            editor: CardEditor::new(),
            host,
        }
    }

    /// Builds a board from raw host state, dropping malformed entries
    pub fn from_host_values(config: BoardConfig, columns: &Value, tasks: &Value, host: H) -> Self {
        Self::new(config, BoardSnapshot::from_host_values(columns, tasks), host)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn editor(&self) -> &CardEditor {
        &self.editor
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Takes over state pushed by the host
    ///
    /// A running drag keeps going; its drop is resolved against the new
    /// snapshot.
    pub fn replace_snapshot(&mut self, snapshot: BoardSnapshot) {
        self.snapshot = snapshot;
    }

    /// Current render model
    pub fn view(&self) -> BoardView {
        view::render(&self.config, &self.snapshot, &self.drag, &self.editor)
    }

    /// Appends a new task to `column_id` and fires `onCreate`
    pub fn add_task(&mut self, column_id: &ColumnId) -> Option<Task> {
        let seed = LogEntry::new(self.config.new_task_log_user.clone(), "");
        let (next, task) = ordering::add_task(
            &self.snapshot,
            column_id,
            &self.config.new_task_content,
            Some(seed),
        )?;

        self.commit(next);
        self.announce(BoardEvent::Create, task.clone());
        Some(task)
    }

    /// Replaces a task's content and fires `onEdit`
    ///
    /// Returns `false` when the task does not exist.
    pub fn update_task(&mut self, task_id: &TaskId, content: &str) -> bool {
        if self.snapshot.task(task_id).is_none() {
            tracing::debug!(task_id = %task_id, "update ignored, unknown task");
            return false;
        }

        let next = ordering::update_task_content(&self.snapshot, task_id, content);
        self.commit(next);
        if let Some(task) = self.snapshot.task(task_id).cloned() {
            self.announce(BoardEvent::Edit, task);
        }
        true
    }

    /// Reports a click on a task through `onClick`
    pub fn click_task(&mut self, task_id: &TaskId) -> bool {
        let Some(task) = self.snapshot.task(task_id).cloned() else {
            return false;
        };
        self.announce(BoardEvent::Click, task);
        true
    }

    /// Puts a card into edit mode (double-click)
    ///
    /// Refused while a drag is running. An edit open on another card is
    /// committed first.
    pub fn begin_edit(&mut self, task_id: &TaskId) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(task) = self.snapshot.task(task_id).cloned() else {
            return false;
        };
        if let Some(previous) = self.editor.begin(&task) {
            self.update_task(&previous.task_id, &previous.content);
        }
        true
    }

    pub fn edit_input(&mut self, text: impl Into<String>) {
        self.editor.input(text);
    }

    /// Closes the edit (Enter or blur), writing back changed text
    pub fn commit_edit(&mut self) -> bool {
        match self.editor.commit() {
            Some(commit) => self.update_task(&commit.task_id, &commit.content),
            None => false,
        }
    }

    /// Discards the edit (Escape)
    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Starts a drag from an encoded slot key
    pub fn drag_start(&mut self, key: &str) -> bool {
        let Some(source) = decode_key(key) else {
            return false;
        };
        if self.is_editing_slot(&source) {
            return false;
        }
        self.drag.start(&self.snapshot, &source)
    }

    /// Updates the hover target from an encoded key (`None` when over nothing)
    pub fn drag_over(&mut self, key: Option<&str>) {
        let target = key.and_then(decode_key);
        self.drag.over(&self.snapshot, target.as_ref());
    }

    /// Drops on an encoded key (`None` when released outside every target)
    pub fn drag_end(&mut self, key: Option<&str>) -> DropOutcome {
        let target = key.and_then(decode_key);
        self.finish_drag(target.as_ref())
    }

    /// Abandons the drag without changing anything
    pub fn drag_cancel(&mut self) {
        self.sensor.reset();
        self.drag.cancel();
    }

    /// Pointer pressed on a card's drag handle
    pub fn pointer_down(&mut self, key: &str, at: Point) -> bool {
        let Some(source) = decode_key(key) else {
            return false;
        };
        if self.drag.is_dragging() || self.is_editing_slot(&source) {
            return false;
        }
        self.sensor.press(source, at)
    }

    /// Pointer moved; may activate the drag and updates the hover target
    pub fn pointer_move(&mut self, at: Point, layout: &BoardLayout) {
        let Some(event) = self.sensor.move_to(at) else {
            return;
        };

        let (key, offset) = match event {
            SensorEvent::Activated { key, offset } => {
                if !self.drag.start(&self.snapshot, &key) {
                    self.sensor.reset();
                    return;
                }
                (key, offset)
            }
            SensorEvent::Moved { key, offset } => (key, offset),
        };

        let target = layout.target_for(&key, offset);
        self.drag.over(&self.snapshot, target);
    }

    /// Pointer released
    ///
    /// A press that never activated counts as a click on the card; an
    /// active drag drops on whatever the dragged card overlaps most.
    pub fn pointer_up(&mut self, layout: &BoardLayout) -> Option<DropOutcome> {
        match self.sensor.release()? {
            PointerRelease::Click { key } => {
                let task_id = self.task_at(&key).map(|task| task.id.clone());
                if let Some(task_id) = task_id {
                    self.click_task(&task_id);
                }
                None
            }
            PointerRelease::Drop { key, offset } => {
                let target = layout.target_for(&key, offset).cloned();
                Some(self.finish_drag(target.as_ref()))
            }
        }
    }

    /// Escape: closes an open edit without saving and cancels any drag
    pub fn escape(&mut self) {
        self.editor.cancel();
        self.drag_cancel();
    }

    /// The board lost focus: drags are cancelled, open edits are committed
    pub fn focus_lost(&mut self) {
        self.drag_cancel();
        self.commit_edit();
    }

    fn finish_drag(&mut self, target: Option<&SlotKey>) -> DropOutcome {
        self.sensor.reset();
        let outcome = self.drag.end(&self.snapshot, target);
        if let Some(next) = outcome.snapshot() {
            self.commit(next.clone());
        }
        outcome
    }

    fn task_at(&self, key: &SlotKey) -> Option<&Task> {
        let index = key.index?;
        tasks_of_column(&self.snapshot, &key.column_id).get(index).copied()
    }

    fn is_editing_slot(&self, key: &SlotKey) -> bool {
        self.task_at(key)
            .is_some_and(|task| self.editor.is_editing(&task.id))
    }

    /// Hands a new snapshot to the host; identical task lists are not written
    fn commit(&mut self, next: BoardSnapshot) -> bool {
        if next.tasks == self.snapshot.tasks {
            return false;
        }
        tracing::debug!(tasks = next.tasks.len(), "committing tasks to host");
        self.host.set_tasks(next.tasks.clone());
        self.snapshot = next;
        true
    }

    fn announce(&mut self, kind: BoardEvent, task: Task) {
        tracing::debug!(event = %kind, task_id = %task.id, "notifying host");
        self.host.set_last_task_event(TaskEvent::new(kind, task));
        self.host.notify(kind);
    }
}

fn decode_key(key: &str) -> Option<SlotKey> {
    slot::decode(key)
        .map_err(|e| tracing::debug!(error = %e, "ignoring malformed slot key"))
        .ok()
}
