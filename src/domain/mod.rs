pub mod board;
pub mod column;
pub mod ids;
pub mod task;

pub use board::{Board, BoardConfig, BoardEvent, BoardObserver};
pub use column::{Column, ColumnId};
pub use ids::IdStrategy;
pub use task::{Priority, Task, TaskId};
