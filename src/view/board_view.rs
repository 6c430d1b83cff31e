use crate::domain::board::{Appearance, BoardConfig, BoardSnapshot, Column, ColumnId};
use crate::domain::ordering::{position_in_column, tasks_of_column};
use crate::domain::slot::{self, SlotKey};
use crate::domain::task::{Attributes, Task, TaskId};
use crate::drag::DragController;
use crate::view::editor::CardEditor;
use serde::Serialize;

/// Placeholder shown in a column without cards
pub const EMPTY_COLUMN_TEXT: &str = "Drop tasks here";

/// One rendered card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    /// Sortable key of the card's slot (`"<column>-<index>"`)
    pub key: String,
    pub task_id: TaskId,
    pub content: String,
    /// Value of the configured text attribute, shown under the content
    pub detail: Option<String>,
    pub accent_color: String,
    /// The real card of the dragged task renders as a placeholder
    pub is_dragging: bool,
    /// Input text while the card is in edit mode
    pub edit_buffer: Option<String>,
    pub attributes: Attributes,
}

impl CardView {
    pub fn is_editing(&self) -> bool {
        self.edit_buffer.is_some()
    }

    /// Only cards that are not being edited expose their drag handle
    pub fn is_draggable(&self) -> bool {
        !self.is_editing()
    }
}

/// One rendered column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub id: ColumnId,
    /// Droppable key of the column body
    pub key: String,
    pub title: String,
    pub color: String,
    pub task_count: usize,
    pub is_drag_over: bool,
    pub placeholder: Option<&'static str>,
    pub cards: Vec<CardView>,
}

/// The whole board as the host should draw it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub title: String,
    pub appearance: Appearance,
    pub columns: Vec<ColumnView>,
    /// Floating copy of the dragged card that follows the pointer
    pub overlay: Option<CardView>,
}

impl BoardView {
    pub fn column(&self, id: &ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|column| &column.id == id)
    }
}

/// Derives the view of `snapshot` under the current drag and edit state
pub fn render(
    config: &BoardConfig,
    snapshot: &BoardSnapshot,
    drag: &DragController,
    editor: &CardEditor,
) -> BoardView {
    let active_id = drag.active_task().map(|task| &task.id);
    let hover_column = drag.hover_column();

    let columns = snapshot
        .columns
        .iter()
        .map(|column| {
            let cards: Vec<CardView> = tasks_of_column(snapshot, &column.id)
                .into_iter()
                .enumerate()
                .map(|(index, task)| {
                    let mut card = card_view(config, column, index, task);
                    card.is_dragging = Some(&task.id) == active_id;
                    card.edit_buffer = editor.buffer_for(&task.id).map(str::to_string);
                    card
                })
                .collect();

            ColumnView {
                id: column.id.clone(),
                key: SlotKey::column(column.id.clone()).to_string(),
                title: column.title.clone(),
                color: column.color.clone(),
                task_count: cards.len(),
                is_drag_over: drag.is_dragging() && hover_column == Some(&column.id),
                placeholder: cards.is_empty().then_some(EMPTY_COLUMN_TEXT),
                cards,
            }
        })
        .collect();

    BoardView {
        title: config.title.clone(),
        appearance: config.appearance.clone(),
        columns,
        overlay: overlay(config, snapshot, drag),
    }
}

fn card_view(config: &BoardConfig, column: &Column, index: usize, task: &Task) -> CardView {
    CardView {
        key: slot::encode(&column.id, index),
        task_id: task.id.clone(),
        content: task.content.clone(),
        detail: task.attribute_text(&config.task_text_attribute),
        accent_color: column.color.clone(),
        is_dragging: false,
        edit_buffer: None,
        attributes: task.attributes.clone(),
    }
}

/// Overlay built from the snapshot's current copy of the dragged task, so it
/// always matches the real card
fn overlay(config: &BoardConfig, snapshot: &BoardSnapshot, drag: &DragController) -> Option<CardView> {
    let active = drag.active_task()?;

    if let Some((column_id, index)) = position_in_column(snapshot, &active.id) {
        if let (Some(column), Some(task)) = (snapshot.column(&column_id), snapshot.task(&active.id)) {
            return Some(card_view(config, column, index, task));
        }
    }

    // The task vanished mid-drag; keep showing what was picked up.
    let source = drag.source()?;
    let column = snapshot.column(&source.column_id)?;
    Some(card_view(config, column, source.index.unwrap_or(0), active))
}
