use crate::domain::task::{Task, TaskId};

/// An open inline edit on one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub task_id: TaskId,
    /// Content when editing began
    pub original: String,
    pub buffer: String,
}

/// Text to write back after an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommit {
    pub task_id: TaskId,
    pub content: String,
}

/// Single-line editor shared by all cards; at most one card edits at a time
#[derive(Debug, Clone, Default)]
pub struct CardEditor {
    session: Option<EditSession>,
}

impl CardEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an edit on `task`
    ///
    /// An edit already open on another card loses focus, which commits it;
    /// that commit is returned.
    pub fn begin(&mut self, task: &Task) -> Option<EditCommit> {
        if self.is_editing(&task.id) {
            return None;
        }
        let previous = self.commit();
        self.session = Some(EditSession {
            task_id: task.id.clone(),
            original: task.content.clone(),
            buffer: task.content.clone(),
        });
        previous
    }

    /// Replaces the text in the input
    pub fn input(&mut self, text: impl Into<String>) {
        if let Some(session) = self.session.as_mut() {
            session.buffer = text.into();
        }
    }

    /// Closes the edit (Enter or blur)
    ///
    /// Yields the trimmed text only when it differs from the content the
    /// edit started with.
    pub fn commit(&mut self) -> Option<EditCommit> {
        let session = self.session.take()?;
        let content = session.buffer.trim();
        if content == session.original {
            return None;
        }
        Some(EditCommit {
            task_id: session.task_id,
            content: content.to_string(),
        })
    }

    /// Discards the edit (Escape)
    pub fn cancel(&mut self) {
        self.session = None;
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self, task_id: &TaskId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| &session.task_id == task_id)
    }

    /// Current input text for `task_id`, when that card is being edited
    pub fn buffer_for(&self, task_id: &TaskId) -> Option<&str> {
        self.session
            .as_ref()
            .filter(|session| &session.task_id == task_id)
            .map(|session| session.buffer.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::ColumnId;
    use std::str::FromStr;

    fn task(id: &str, content: &str) -> Task {
        Task::new(
            TaskId::from_str(id).unwrap(),
            ColumnId::from_str("todo").unwrap(),
            content,
        )
    }

    #[test]
    fn test_commit_trims_changed_text() {
        let mut editor = CardEditor::new();
        editor.begin(&task("t1", "Call"));
        editor.input("  Call back  ");

        let commit = editor.commit().unwrap();
        assert_eq!(commit.task_id.as_str(), "t1");
        assert_eq!(commit.content, "Call back");
        assert!(editor.session().is_none());
    }

    #[test]
    fn test_commit_unchanged_text_is_skipped() {
        let mut editor = CardEditor::new();
        editor.begin(&task("t1", "Call"));
        editor.input("Call   ");

        assert_eq!(editor.commit(), None);
    }

    #[test]
    fn test_cancel_discards() {
        let mut editor = CardEditor::new();
        editor.begin(&task("t1", "Call"));
        editor.input("Something else");

        editor.cancel();

        assert!(editor.session().is_none());
        assert_eq!(editor.commit(), None);
    }

    #[test]
    fn test_begin_on_other_card_commits_previous() {
        let mut editor = CardEditor::new();
        editor.begin(&task("t1", "Call"));
        editor.input("Email");

        let previous = editor.begin(&task("t2", "Visit")).unwrap();

        assert_eq!(previous.task_id.as_str(), "t1");
        assert_eq!(previous.content, "Email");
        assert!(editor.is_editing(&TaskId::from_str("t2").unwrap()));
        assert_eq!(editor.buffer_for(&TaskId::from_str("t2").unwrap()), Some("Visit"));
    }

    #[test]
    fn test_begin_same_card_keeps_buffer() {
        let mut editor = CardEditor::new();
        let t1 = task("t1", "Call");
        editor.begin(&t1);
        editor.input("Cal");

        assert_eq!(editor.begin(&t1), None);
        assert_eq!(editor.buffer_for(&t1.id), Some("Cal"));
    }

    #[test]
    fn test_input_without_session() {
        let mut editor = CardEditor::new();
        editor.input("ignored");
        assert!(editor.session().is_none());
    }
}
