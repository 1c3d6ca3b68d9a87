//! Core view-model types for the nestlist library
//!
//! These are the entities the rendering layer reads: a summary view of each
//! list for the navigation panel, and a full task tree per list. All state
//! that is local to the UI (`visible`, `completed_collapsed`, the open-menu
//! reference) lives here and is never persisted remotely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Server-assigned identifiers are opaque strings.
pub type ListId = String;
pub type TaskId = String;
pub type SubtaskId = String;

/// Substituted when the remote side returns a missing or null task name.
pub const UNTITLED_TASK: &str = "Untitled Task";
/// Substituted when the remote side returns a missing or null subtask name.
pub const UNTITLED_SUBTASK: &str = "Untitled Subtask";

/// Summary view of a list, as shown in the navigation panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: ListId,
    pub title: String,
    /// UI-only: whether the list is shown in the content area.
    pub visible: bool,
    /// Derived: always equals the length of the matching tree's `tasks`.
    pub count: usize,
}

impl ListSummary {
    /// Creates a summary for a freshly created or loaded list.
    pub fn new(id: ListId, title: String) -> Self {
        Self {
            id,
            title,
            visible: true,
            count: 0,
        }
    }
}

/// Full-detail counterpart of a list: its task sequence plus UI-only flags.
///
/// Shares its `id` with the [`ListSummary`] for the same logical list; the
/// two are created and destroyed together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskTree {
    pub id: ListId,
    pub title: String,
    /// UI-only: whether the completed section is collapsed.
    pub completed_collapsed: bool,
    pub tasks: Vec<Task>,
}

impl TaskTree {
    /// Creates an empty tree for a freshly created or loaded list.
    pub fn new(id: ListId, title: String) -> Self {
        Self {
            id,
            title,
            completed_collapsed: true,
            tasks: Vec::new(),
        }
    }

    /// Looks up a task by id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub(crate) fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }
}

/// A single actionable item belonging to exactly one list at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Display label. The remote representation calls this `task_name`; the
    /// rename happens once, at the wire boundary.
    pub text: String,
    pub completed: bool,
    /// Chronological sort key.
    pub created_at: DateTime<Utc>,
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Looks up a subtask by id.
    pub fn subtask(&self, subtask_id: &str) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == subtask_id)
    }
}

/// A single actionable item belonging to exactly one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub text: String,
    pub completed: bool,
}

/// The one settings menu that may be open across the whole hierarchy.
///
/// A single tagged reference rather than a boolean per entity: at most one
/// menu is open at any time, and opening a menu needs no sibling sweep.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenMenu {
    #[default]
    None,
    List(ListId),
    Task { list: ListId, task: TaskId },
}

impl OpenMenu {
    /// True if this reference points at the given list's menu.
    pub fn is_list(&self, list_id: &str) -> bool {
        matches!(self, OpenMenu::List(id) if id == list_id)
    }

    /// True if this reference points at the given task's menu.
    pub fn is_task(&self, list_id: &str, task_id: &str) -> bool {
        matches!(self, OpenMenu::Task { list, task } if list == list_id && task == task_id)
    }

    /// True if this reference points anywhere into the given list's subtree.
    pub fn is_within_list(&self, list_id: &str) -> bool {
        match self {
            OpenMenu::None => false,
            OpenMenu::List(id) => id == list_id,
            OpenMenu::Task { list, .. } => list == list_id,
        }
    }
}
