//! Headless views: what the host renders, and the inline card editor.

pub mod board_view;
pub mod editor;

pub use board_view::{render, BoardView, CardView, ColumnView, EMPTY_COLUMN_TEXT};
pub use editor::{CardEditor, EditCommit, EditSession};
