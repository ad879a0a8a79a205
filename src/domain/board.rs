use crate::domain::{
    column::{Column, ColumnId},
    ids::IdStrategy,
    task::{Task, TaskId},
};
use crate::error::{BoardError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, trace};

/// Initialization input for a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: HashMap<TaskId, Task>,
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl BoardConfig {
    pub fn new(columns: Vec<Column>, tasks: HashMap<TaskId, Task>) -> Self {
        Self {
            columns,
            tasks,
            id_strategy: IdStrategy::default(),
        }
    }

    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Parses a board configuration from JSON. Every field is optional.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Strict cross-reference check.
    ///
    /// [`Board::new`] never calls this; dangling ids are tolerated there and
    /// filtered out of derived views. Callers that want to reject such input
    /// up front run it themselves.
    pub fn validate(&self) -> Result<()> {
        let problems = invariant_violations(&self.columns, &self.tasks);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(BoardError::InvalidConfig(problems))
        }
    }
}

impl Default for BoardConfig {
    /// The built-in sample board: three columns, four tasks
    fn default() -> Self {
        let columns = vec![
            Column::new("todo", "To Do").with_task_ids(["t1", "t2"]),
            Column::new("inprogress", "In Progress").with_task_ids(["t3"]),
            Column::new("done", "Done").with_task_ids(["t4"]),
        ];

        let tasks = [
            Task::new("t1", "Write README", "todo")
                .with_assignee("Vikas")
                .with_tags(["docs"]),
            Task::new("t2", "Create wireframe", "todo")
                .with_assignee("Alice")
                .with_tags(["design"]),
            Task::new("t3", "Implement header", "inprogress")
                .with_assignee("Bob")
                .with_tags(["frontend"]),
            Task::new("t4", "Project kickoff", "done").with_assignee("Vikas"),
        ]
        .into_iter()
        .map(|task| (task.id.clone(), task))
        .collect();

        Self::new(columns, tasks)
    }
}

/// A state change that has been fully applied to a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    TaskAdded {
        id: TaskId,
        column: ColumnId,
    },
    TaskDeleted {
        id: TaskId,
    },
    TaskRelocated {
        id: TaskId,
        from: ColumnId,
        to: ColumnId,
        index: usize,
    },
}

/// Receives change notifications from a [`Board`].
///
/// Called once per effective mutation, after the board is consistent again.
pub trait BoardObserver {
    fn on_change(&mut self, board: &Board, event: &BoardEvent);
}

impl<F> BoardObserver for F
where
    F: FnMut(&Board, &BoardEvent),
{
    fn on_change(&mut self, board: &Board, event: &BoardEvent) {
        self(board, event)
    }
}

/// Board state store: the only owner of the column and task collections
pub struct Board {
    columns: Vec<Column>,
    tasks: HashMap<TaskId, Task>,
    id_strategy: IdStrategy,
    next_task_number: u64,
    revision: u64,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl Board {
    /// Builds a board, falling back to the sample columns and/or sample tasks
    /// when the corresponding input is empty.
    pub fn new(config: BoardConfig) -> Self {
        let BoardConfig {
            columns,
            tasks,
            id_strategy,
        } = config;

        let columns = if columns.is_empty() {
            debug!("no columns supplied, using sample columns");
            BoardConfig::default().columns
        } else {
            columns
        };
        let tasks = if tasks.is_empty() {
            debug!("no tasks supplied, using sample tasks");
            BoardConfig::default().tasks
        } else {
            tasks
        };

        Self {
            columns,
            tasks,
            id_strategy,
            next_task_number: 1,
            revision: 0,
            observers: Vec::new(),
        }
    }

    /// Shorthand for [`Board::new`] with the default id strategy
    pub fn initialize(columns: Vec<Column>, tasks: HashMap<TaskId, Task>) -> Self {
        Self::new(BoardConfig::new(columns, tasks))
    }

    /// Registers an observer for subsequent mutations
    pub fn subscribe(&mut self, observer: Box<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    /// Number of effective mutations applied since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.id.as_str() == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn tasks(&self) -> &HashMap<TaskId, Task> {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Tasks of a column in display order.
    ///
    /// Ids with no matching task are skipped. An unknown column yields an
    /// empty list.
    pub fn tasks_in_column(&self, column_id: &str) -> Vec<&Task> {
        self.column(column_id)
            .map(|col| {
                col.task_ids
                    .iter()
                    .filter_map(|id| self.tasks.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Count shown in a column header
    pub fn column_count(&self, column_id: &str) -> usize {
        self.tasks_in_column(column_id).len()
    }

    /// Creates a task at the top of `column_id`.
    ///
    /// Returns `None` without touching the board when the trimmed title is
    /// empty or the column does not exist.
    pub fn add_task(&mut self, column_id: &str, title: &str) -> Option<TaskId> {
        let title = title.trim();
        if title.is_empty() {
            debug!(column = column_id, "skipping add: blank title");
            return None;
        }

        let Some(col_idx) = self.column_index(column_id) else {
            debug!(column = column_id, "skipping add: unknown column");
            return None;
        };

        // Ids listed by a column but missing from the task map are taken too.
        let tasks = &self.tasks;
        let columns = &self.columns;
        let id = self
            .id_strategy
            .next_id(&mut self.next_task_number, |candidate| {
                tasks.contains_key(candidate)
                    || columns
                        .iter()
                        .any(|col| col.task_ids.iter().any(|id| id.as_str() == candidate))
            });

        let column = self.columns[col_idx].id.clone();
        let task = Task::new(id.clone(), title, column.clone()).with_created_at(Utc::now());

        self.tasks.insert(id.clone(), task);
        self.columns[col_idx].task_ids.insert(0, id.clone());

        debug!(task_id = %id, column = %column, "added task");
        self.commit(BoardEvent::TaskAdded {
            id: id.clone(),
            column,
        });
        Some(id)
    }

    /// Removes a task from the mapping and from every column holding its id.
    ///
    /// Returns false when nothing referenced the id.
    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let removed = self.tasks.remove(task_id).is_some();

        let mut unlinked = false;
        for col in &mut self.columns {
            let before = col.task_ids.len();
            col.task_ids.retain(|id| id.as_str() != task_id);
            unlinked |= col.task_ids.len() != before;
        }

        if !removed && !unlinked {
            debug!(task_id, "skipping delete: unknown task");
            return false;
        }

        debug!(task_id, "deleted task");
        self.commit(BoardEvent::TaskDeleted {
            id: TaskId::new(task_id),
        });
        true
    }

    /// Moves a task from one column to another, or within one column.
    ///
    /// `to_index` is measured against the destination sequence after the task
    /// has been taken out of it, so same-column reorders land where asked.
    /// `None` or an index past the end appends. Capacity limits are not
    /// checked.
    ///
    /// Returns false without touching the board when either column or the
    /// task is unknown.
    pub fn relocate_task(
        &mut self,
        task_id: &str,
        from_column_id: &str,
        to_column_id: &str,
        to_index: Option<usize>,
    ) -> bool {
        let (Some(from_idx), Some(to_idx)) = (
            self.column_index(from_column_id),
            self.column_index(to_column_id),
        ) else {
            debug!(
                task_id,
                from = from_column_id,
                to = to_column_id,
                "skipping relocation: unknown column"
            );
            return false;
        };

        if !self.tasks.contains_key(task_id) {
            debug!(task_id, "skipping relocation: unknown task");
            return false;
        }
        let id = TaskId::new(task_id);

        // Remove by id from every lane; `from_column_id` may be stale.
        for col in &mut self.columns {
            col.task_ids.retain(|existing| existing != &id);
        }

        let dest = &mut self.columns[to_idx].task_ids;
        let index = match to_index {
            Some(index) if index <= dest.len() => index,
            _ => dest.len(),
        };
        dest.insert(index, id.clone());
        trace!(task_id = %id, index, len = dest.len(), "placed task");

        let from = self.columns[from_idx].id.clone();
        let to = self.columns[to_idx].id.clone();
        if let Some(task) = self.tasks.get_mut(task_id) {
            task.status = to.clone();
        }

        debug!(task_id = %id, from = %from, to = %to, index, "relocated task");
        self.commit(BoardEvent::TaskRelocated {
            id,
            from,
            to,
            index,
        });
        true
    }

    /// Lists every broken cross-reference between columns and tasks.
    /// Empty when the board is consistent.
    pub fn check_invariants(&self) -> Vec<String> {
        invariant_violations(&self.columns, &self.tasks)
    }

    /// Copies the current state out as an initialization config
    pub fn snapshot(&self) -> BoardConfig {
        BoardConfig {
            columns: self.columns.clone(),
            tasks: self.tasks.clone(),
            id_strategy: self.id_strategy,
        }
    }

    fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.id.as_str() == id)
    }

    fn commit(&mut self, event: BoardEvent) {
        self.revision += 1;

        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            observer.on_change(self, &event);
        }
        self.observers = observers;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("columns", &self.columns)
            .field("tasks", &self.tasks)
            .field("id_strategy", &self.id_strategy)
            .field("next_task_number", &self.next_task_number)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn invariant_violations(columns: &[Column], tasks: &HashMap<TaskId, Task>) -> Vec<String> {
    let mut problems = Vec::new();
    let mut owners: HashMap<&TaskId, Vec<&ColumnId>> = HashMap::new();

    for col in columns {
        let mut seen = HashSet::new();
        for id in &col.task_ids {
            if !tasks.contains_key(id) {
                problems.push(format!("column {} references missing task {}", col.id, id));
            }
            if !seen.insert(id) {
                problems.push(format!("column {} lists task {} more than once", col.id, id));
            }
            owners.entry(id).or_default().push(&col.id);
        }
    }

    for (id, cols) in &owners {
        let mut distinct: Vec<&ColumnId> = cols.clone();
        distinct.sort();
        distinct.dedup();
        if distinct.len() > 1 {
            let names: Vec<&str> = distinct.iter().map(|c| c.as_str()).collect();
            problems.push(format!("task {} appears in columns {}", id, names.join(", ")));
        }
    }

    let mut ids: Vec<&TaskId> = tasks.keys().collect();
    ids.sort();
    for id in ids {
        let task = &tasks[id];
        if &task.id != id {
            problems.push(format!("task keyed {} carries id {}", id, task.id));
        }
        match columns.iter().find(|col| col.id == task.status) {
            None => problems.push(format!("task {} has unknown status {}", id, task.status)),
            Some(col) if !col.contains(id) => problems.push(format!(
                "task {} has status {} but that column does not list it",
                id, task.status
            )),
            Some(_) => {}
        }
    }

    problems
}
