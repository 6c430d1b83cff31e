use crate::domain::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod memory_host;

pub use memory_host::MemoryHost;

/// Named notifications the board fires at its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardEvent {
    #[serde(rename = "onEdit")]
    Edit,
    #[serde(rename = "onCreate")]
    Create,
    #[serde(rename = "onClick")]
    Click,
}

impl BoardEvent {
    /// Name the host subscribes to
    pub fn name(&self) -> &'static str {
        match self {
            Self::Edit => "onEdit",
            Self::Create => "onCreate",
            Self::Click => "onClick",
        }
    }
}

impl fmt::Display for BoardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The side-channel value describing the task behind the latest notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEvent {
    pub kind: BoardEvent,
    pub task: Task,
    pub emitted_at: DateTime<Utc>,
}

impl TaskEvent {
    pub fn new(kind: BoardEvent, task: Task) -> Self {
        Self {
            kind,
            task,
            emitted_at: Utc::now(),
        }
    }
}

/// The application embedding the board
///
/// The host owns the single writable copy of the task list. Calls are
/// synchronous and complete before the board renders again.
pub trait BoardHost {
    /// Replaces the persisted task list
    fn set_tasks(&mut self, tasks: Vec<Task>);

    /// Publishes the task involved in the upcoming notification
    fn set_last_task_event(&mut self, event: TaskEvent);

    /// Fires a named notification; the payload is the last task event
    fn notify(&mut self, event: BoardEvent);
}

impl<H: BoardHost + ?Sized> BoardHost for &mut H {
    fn set_tasks(&mut self, tasks: Vec<Task>) {
        (**self).set_tasks(tasks);
    }

    fn set_last_task_event(&mut self, event: TaskEvent) {
        (**self).set_last_task_event(event);
    }

    fn notify(&mut self, event: BoardEvent) {
        (**self).notify(event);
    }
}

impl<H: BoardHost + ?Sized> BoardHost for Box<H> {
    fn set_tasks(&mut self, tasks: Vec<Task>) {
        (**self).set_tasks(tasks);
    }

    fn set_last_task_event(&mut self, event: TaskEvent) {
        (**self).set_last_task_event(event);
    }

    fn notify(&mut self, event: BoardEvent) {
        (**self).notify(event);
    }
}
