//! Property-based tests for board mutations
//!
//! Random sequences of add/delete/relocate operations are applied to the
//! sample board; the cross-references between columns and tasks must hold
//! after every step.

use kanban_board_core::{Board, Column, Task};
use proptest::prelude::*;
use std::collections::HashMap;

const COLUMNS: [&str; 4] = ["todo", "inprogress", "done", "missing"];

#[derive(Debug, Clone)]
enum Op {
    Add { column: usize, title: String },
    Delete { task: usize },
    Relocate { task: usize, from: usize, to: usize, index: Option<usize> },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..COLUMNS.len(), "[ a-z]{0,8}").prop_map(|(column, title)| Op::Add { column, title }),
        (0..16usize).prop_map(|task| Op::Delete { task }),
        (
            0..16usize,
            0..COLUMNS.len(),
            0..COLUMNS.len(),
            prop::option::of(0..8usize)
        )
            .prop_map(|(task, from, to, index)| Op::Relocate { task, from, to, index }),
    ]
}

/// Picks an existing task id by position, or a bogus one past the end
fn pick_task(board: &Board, n: usize) -> String {
    let mut ids: Vec<&str> = board.tasks().keys().map(|id| id.as_str()).collect();
    ids.sort();
    ids.get(n).map(|id| id.to_string()).unwrap_or_else(|| format!("ghost-{n}"))
}

fn total_placed(board: &Board) -> usize {
    board.columns().iter().map(|col| col.task_ids.len()).sum()
}

fn apply(board: &mut Board, op: &Op) {
    match op {
        Op::Add { column, title } => {
            board.add_task(COLUMNS[*column], title);
        }
        Op::Delete { task } => {
            let id = pick_task(board, *task);
            board.delete_task(&id);
        }
        Op::Relocate { task, from, to, index } => {
            let id = pick_task(board, *task);
            board.relocate_task(&id, COLUMNS[*from], COLUMNS[*to], *index);
        }
    }
}

proptest! {
    /// Property: every operation leaves the board consistent
    #[test]
    fn prop_invariants_hold(ops in prop::collection::vec(op(), 0..40)) {
        let mut board = Board::default();
        prop_assert!(board.check_invariants().is_empty());

        for op in &ops {
            apply(&mut board, op);
            let problems = board.check_invariants();
            prop_assert!(problems.is_empty(), "after {:?}: {:?}", op, problems);
        }
    }

    /// Property: relocation never changes how many tasks are on the board
    #[test]
    fn prop_relocation_is_a_permutation(
        moves in prop::collection::vec((0..16usize, 0..3usize, 0..3usize, prop::option::of(0..8usize)), 0..30)
    ) {
        let mut board = Board::default();
        let tasks = board.task_count();
        let placed = total_placed(&board);

        for (task, from, to, index) in moves {
            let id = pick_task(&board, task);
            board.relocate_task(&id, COLUMNS[from], COLUMNS[to], index);

            prop_assert_eq!(board.task_count(), tasks);
            prop_assert_eq!(total_placed(&board), placed);
        }
    }

    /// Property: appending and an out-of-range index place the task last
    #[test]
    fn prop_append_places_last(task in 0..4usize, to in 0..3usize, overshoot in 0..5usize) {
        let mut appended = Board::default();
        let mut clamped = Board::default();
        let id = pick_task(&appended, task);
        let from = appended.task(&id).unwrap().status.as_str().to_string();

        appended.relocate_task(&id, &from, COLUMNS[to], None);

        let len_after_removal = clamped
            .column(COLUMNS[to])
            .unwrap()
            .task_ids
            .iter()
            .filter(|existing| existing.as_str() != id)
            .count();
        clamped.relocate_task(&id, &from, COLUMNS[to], Some(len_after_removal + 1 + overshoot));

        let last = appended.tasks_in_column(COLUMNS[to]).last().map(|t| t.id.as_str().to_string());
        prop_assert_eq!(last, Some(id));
        prop_assert_eq!(appended.columns(), clamped.columns());
    }
}

#[test]
fn dangling_reference_is_tolerated() {
    let columns = vec![
        Column::new("todo", "To Do").with_task_ids(["a", "gone"]),
        Column::new("done", "Done"),
    ];
    let tasks: HashMap<_, _> = [Task::new("a", "A", "todo")]
        .into_iter()
        .map(|t| (t.id.clone(), t))
        .collect();

    let mut board = Board::initialize(columns, tasks);
    let view: Vec<&str> = board
        .tasks_in_column("todo")
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(view, vec!["a"]);

    assert!(board.relocate_task("a", "todo", "done", None));
    assert!(board.tasks_in_column("todo").is_empty());
}

#[test]
fn add_then_read() {
    let mut board = Board::default();

    board.add_task("todo", "  Fix bug  ").unwrap();
    assert_eq!(board.tasks_in_column("todo")[0].title, "Fix bug");

    let before: Vec<String> = board
        .tasks_in_column("todo")
        .iter()
        .map(|t| t.id.to_string())
        .collect();
    assert!(board.add_task("todo", "   ").is_none());
    let after: Vec<String> = board
        .tasks_in_column("todo")
        .iter()
        .map(|t| t.id.to_string())
        .collect();
    assert_eq!(before, after);
}
