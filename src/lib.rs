//! # Kanban Board Core
//!
//! In-memory state model for a kanban board view: ordered columns holding
//! task ids, a task mapping, and the drag relocation protocol that moves
//! tasks between (and within) columns.
//!
//! Rendering is left to the caller. A renderer reads from [`Board`],
//! forwards gestures through [`gesture::DragGesture`] and text entry through
//! [`interaction::TaskEntry`], and subscribes to change notifications via
//! [`BoardObserver`].

pub mod display;
pub mod domain;
pub mod error;
pub mod gesture;
pub mod interaction;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardConfig, BoardEvent, BoardObserver},
    column::{Column, ColumnId},
    ids::IdStrategy,
    task::{Priority, Task, TaskId},
};
pub use error::{BoardError, Result};
pub use gesture::{DataTransfer, DragGesture, DragPayload, DropTarget, DRAG_PAYLOAD_TYPE};
pub use interaction::{Interaction, TaskEntry};
