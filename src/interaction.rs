//! Transient view state that is not board data: the "add task" text entry
//! and the drag gesture in flight.

use crate::domain::board::Board;
use crate::domain::column::ColumnId;
use crate::domain::task::TaskId;
use crate::gesture::DragGesture;
use tracing::debug;

/// "Add task" text entry for at most one column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEntry {
    adding_to: Option<ColumnId>,
    input: String,
}

impl TaskEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column currently in entry mode, if any
    pub fn adding_to(&self) -> Option<&ColumnId> {
        self.adding_to.as_ref()
    }

    pub fn is_adding_to(&self, column_id: &str) -> bool {
        self.adding_to
            .as_ref()
            .is_some_and(|col| col.as_str() == column_id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Opens entry for `column_id` with an empty input, closing any other
    pub fn begin(&mut self, column_id: impl Into<ColumnId>) {
        self.adding_to = Some(column_id.into());
        self.input.clear();
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Adds the typed title to `column_id`.
    ///
    /// On success the entry closes. A blank title leaves the entry open with
    /// its input untouched.
    pub fn submit(&mut self, board: &mut Board, column_id: &str) -> Option<TaskId> {
        let id = board.add_task(column_id, &self.input)?;
        self.cancel();
        Some(id)
    }

    /// Closes entry and discards the input
    pub fn cancel(&mut self) {
        self.adding_to = None;
        self.input.clear();
    }
}

/// All ephemeral interaction state of one board view
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    pub entry: TaskEntry,
    pub gesture: DragGesture,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape key: closes text entry and abandons any drag
    pub fn escape(&mut self) {
        debug!("escape pressed");
        self.entry.cancel();
        self.gesture.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::DataTransfer;

    #[test]
    fn test_begin_and_submit() {
        let mut board = Board::default();
        let mut entry = TaskEntry::new();

        entry.begin("todo");
        assert!(entry.is_adding_to("todo"));
        entry.set_input("  Ship it ");

        let id = entry.submit(&mut board, "todo").unwrap();

        assert_eq!(board.task(id.as_str()).unwrap().title, "Ship it");
        assert!(entry.adding_to().is_none());
        assert_eq!(entry.input(), "");
    }

    #[test]
    fn test_blank_submit_keeps_entry_open() {
        let mut board = Board::default();
        let mut entry = TaskEntry::new();

        entry.begin("done");
        entry.set_input("   ");

        assert!(entry.submit(&mut board, "done").is_none());
        assert!(entry.is_adding_to("done"));
        assert_eq!(entry.input(), "   ");
        assert_eq!(board.task_count(), 4);
    }

    #[test]
    fn test_begin_resets_input_and_switches_column() {
        let mut entry = TaskEntry::new();

        entry.begin("todo");
        entry.set_input("draft");
        entry.begin("done");

        assert!(entry.is_adding_to("done"));
        assert!(!entry.is_adding_to("todo"));
        assert_eq!(entry.input(), "");
    }

    #[test]
    fn test_escape_clears_entry_and_drag() {
        let mut board = Board::default();
        let mut interaction = Interaction::new();
        let mut transfer = DataTransfer::new();

        interaction.entry.begin("todo");
        interaction.entry.set_input("half typed");
        interaction
            .gesture
            .start(&mut transfer, "t1", "todo")
            .unwrap();

        interaction.escape();

        assert!(interaction.entry.adding_to().is_none());
        assert_eq!(interaction.entry.input(), "");
        assert!(!interaction.gesture.is_dragging());
        assert_eq!(board.revision(), 0);

        // The board is only touched by an explicit drop
        board.add_task("todo", "unrelated");
        assert_eq!(board.revision(), 1);
    }
}
