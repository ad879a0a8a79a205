use crate::domain::task::TaskId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How new task ids are minted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `task-1`, `task-2`, ... from a per-board counter
    #[default]
    Sequential,
    /// `task-<uuid v4>`
    Uuid,
}

impl IdStrategy {
    const PREFIX: &'static str = "task";

    /// Produces an id not accepted by `taken`.
    ///
    /// `counter` holds the next sequence number and is advanced past every
    /// number consumed, including ones skipped because they were taken.
    pub fn next_id(&self, counter: &mut u64, taken: impl Fn(&str) -> bool) -> TaskId {
        loop {
            let candidate = match self {
                Self::Sequential => {
                    let id = format!("{}-{}", Self::PREFIX, counter);
                    *counter += 1;
                    id
                }
                Self::Uuid => format!("{}-{}", Self::PREFIX, Uuid::new_v4().simple()),
            };

            if !taken(&candidate) {
                return TaskId::new(candidate);
            }
        }
    }
}
