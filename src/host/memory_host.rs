use crate::domain::task::Task;
use crate::host::{BoardEvent, BoardHost, TaskEvent};

/// Host that keeps everything in memory
///
/// Useful when embedding the board in tests or in hosts that sync state on
/// their own schedule.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    tasks: Option<Vec<Task>>,
    last_task_event: Option<TaskEvent>,
    notifications: Vec<BoardEvent>,
    commits: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The task list last written by the board, if any
    pub fn tasks(&self) -> Option<&[Task]> {
        self.tasks.as_deref()
    }

    pub fn last_task_event(&self) -> Option<&TaskEvent> {
        self.last_task_event.as_ref()
    }

    /// Notifications in the order they were fired
    pub fn notifications(&self) -> &[BoardEvent] {
        &self.notifications
    }

    /// Number of times the task list was written
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl BoardHost for MemoryHost {
    fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = Some(tasks);
        self.commits += 1;
    }

    fn set_last_task_event(&mut self, event: TaskEvent) {
        self.last_task_event = Some(event);
    }

    fn notify(&mut self, event: BoardEvent) {
        self.notifications.push(event);
    }
}
