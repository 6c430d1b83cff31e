//! # Taskboard Core
//!
//! Drag-and-drop kanban board logic for embedding in a host application.
//!
//! The host supplies columns and tasks and receives change notifications;
//! this crate derives the ordered per-column views, interprets pointer drag
//! gestures against them and computes the next, fully renumbered snapshot.
//! Nothing here touches storage or draws pixels: views are plain data for the
//! host to render.

pub mod domain;
pub mod drag;
pub mod error;
pub mod host;
pub mod view;
pub mod widget;

// Re-export commonly used types
pub use domain::{
    board::{Appearance, BoardConfig, BoardSnapshot, Column, ColumnId},
    slot::SlotKey,
    task::{LogEntry, Task, TaskId},
};
pub use drag::{BoardLayout, DragController, DragState, DropOutcome};
pub use error::{Result, TaskBoardError};
pub use host::{BoardEvent, BoardHost, MemoryHost, TaskEvent};
pub use view::{BoardView, CardView, ColumnView};
pub use widget::KanbanBoard;
