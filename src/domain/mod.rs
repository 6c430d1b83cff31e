pub mod board;
pub mod ordering;
pub mod slot;
pub mod task;

pub use board::{default_columns, Appearance, BoardConfig, BoardSnapshot, Column, ColumnId};
pub use slot::SlotKey;
pub use task::{Attributes, LogEntry, Task, TaskId};
