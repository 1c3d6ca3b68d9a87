//! Wire representation of remote entities
//!
//! The remote service names display labels `task_name`/`subtask_name`; the
//! local view model calls both `text`. The rename happens here, once per
//! entity kind, at every read boundary (fetch and create responses). Writes
//! never rename back; they send raw trimmed text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Subtask, Task, UNTITLED_SUBTASK, UNTITLED_TASK};

/// A list as the remote service returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteList {
    pub id: String,
    pub title: String,
}

/// A task as the remote service returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteTask {
    pub id: String,
    pub task_name: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A subtask as the remote service returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSubtask {
    pub id: String,
    pub subtask_name: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Converts a remote task into the view model, with its fetched subtasks.
///
/// A missing name becomes a fixed placeholder rather than propagating null
/// into the view.
pub fn task_from_wire(wire: RemoteTask, subtasks: Vec<Subtask>) -> Task {
    Task {
        id: wire.id,
        text: wire
            .task_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNTITLED_TASK.to_string()),
        completed: wire.completed,
        created_at: wire.created_at,
        subtasks,
    }
}

/// Converts a remote subtask into the view model.
pub fn subtask_from_wire(wire: RemoteSubtask) -> Subtask {
    Subtask {
        id: wire.id,
        text: wire
            .subtask_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNTITLED_SUBTASK.to_string()),
        completed: wire.completed,
    }
}
