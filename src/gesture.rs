//! Drag relocation protocol.
//!
//! A gesture is Idle until [`DragGesture::start`] writes a [`DragPayload`]
//! into the platform's [`DataTransfer`]. Dropping reads it back and asks the
//! board to relocate the task; anything unreadable abandons the gesture.
//! Only one gesture is ever in flight.

use crate::domain::board::Board;
use crate::domain::column::ColumnId;
use crate::domain::task::TaskId;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Data type the payload travels under. Generic text payloads from other
/// drag sources never collide with it.
pub const DRAG_PAYLOAD_TYPE: &str = "application/kanban-task";

/// What is being dragged and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub task_id: TaskId,
    pub from_column_id: ColumnId,
}

impl DragPayload {
    pub fn new(task_id: impl Into<TaskId>, from_column_id: impl Into<ColumnId>) -> Self {
        Self {
            task_id: task_id.into(),
            from_column_id: from_column_id.into(),
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(BoardError::EmptyPayload);
        }

        let payload: Self =
            serde_json::from_str(raw).map_err(|e| BoardError::InvalidPayload(e.to_string()))?;

        if payload.task_id.as_str().is_empty() || payload.from_column_id.as_str().is_empty() {
            return Err(BoardError::InvalidPayload(raw.to_string()));
        }
        Ok(payload)
    }
}

/// Typed key/value store standing in for the platform drag channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    items: HashMap<String, String>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        self.items.insert(format.to_string(), data.into());
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.items.get(format).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Where a drop landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Column body: append to the end
    Column(ColumnId),
    /// A card at `index` in `column`: insert at that position
    Card { column: ColumnId, index: usize },
}

impl DropTarget {
    pub fn column(&self) -> &ColumnId {
        match self {
            Self::Column(column) | Self::Card { column, .. } => column,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Column(_) => None,
            Self::Card { index, .. } => Some(*index),
        }
    }
}

/// Answer to a drag-over event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    /// Suppress the platform's default rejection and show a move cursor
    Move,
}

/// Single-slot drag state machine
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    active: Option<DragPayload>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.active.as_ref()
    }

    /// Idle -> Dragging. Writes the payload into `transfer`; the board is
    /// untouched. Starting while already dragging replaces the old gesture.
    pub fn start(
        &mut self,
        transfer: &mut DataTransfer,
        task_id: impl Into<TaskId>,
        from_column_id: impl Into<ColumnId>,
    ) -> Result<()> {
        let payload = DragPayload::new(task_id, from_column_id);
        transfer.set_data(DRAG_PAYLOAD_TYPE, payload.encode()?);

        debug!(task_id = %payload.task_id, from = %payload.from_column_id, "drag started");
        self.active = Some(payload);
        Ok(())
    }

    /// Dragging -> Dragging. Advisory only.
    pub fn drag_over(&self) -> DropEffect {
        DropEffect::Move
    }

    /// Dragging -> Idle. Relocates the task named by the payload in
    /// `transfer`, or abandons the gesture if the payload is missing or
    /// unreadable. Returns whether the board changed.
    pub fn drop(&mut self, board: &mut Board, target: &DropTarget, transfer: &DataTransfer) -> bool {
        self.active = None;

        let Some(raw) = transfer.get_data(DRAG_PAYLOAD_TYPE) else {
            debug!("drop abandoned: no payload");
            return false;
        };

        let payload = match DragPayload::decode(raw) {
            Ok(payload) => payload,
            Err(e) => {
                debug!(error = %e, "drop abandoned");
                return false;
            }
        };

        board.relocate_task(
            payload.task_id.as_str(),
            payload.from_column_id.as_str(),
            target.column().as_str(),
            target.index(),
        )
    }

    /// Dragging -> Idle with no effect on the board
    pub fn abandon(&mut self) {
        if let Some(payload) = self.active.take() {
            debug!(task_id = %payload.task_id, "drag abandoned");
        }
    }
}
