//! The sync engine
//!
//! Orchestrates every mutation of the hierarchy. Persistent operations issue
//! exactly one gateway call and, on success, apply the server-confirmed
//! state to the store; on failure they surface a brief notice and leave the
//! store untouched. Input collection and confirmation go through the
//! [`Shell`] collaborator, and cancelled or empty input aborts silently
//! before any gateway call.
//!
//! The store lives behind an `Arc<Mutex<_>>` with a broadcast channel so a
//! rendering layer can re-read a snapshot after every change.

use std::sync::{Arc, Mutex};

use futures::future::join_all;

use crate::gateway::{subtask_from_wire, task_from_wire, Gateway};
use crate::models::{ListId, ListSummary, TaskTree};
use crate::shell::Shell;
use crate::sort::SortKey;
use crate::store::Store;

/// How an engine operation concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Gateway confirmed; the store was updated.
    Applied,
    /// The user cancelled or supplied empty input; nothing happened.
    Aborted,
    /// The gateway rejected; a notice was shown and the store is unchanged.
    Failed,
}

/// The client-side synchronization engine for the list/task/subtask
/// hierarchy.
#[derive(Clone)]
pub struct Engine {
    store: Arc<Mutex<Store>>,
    gateway: Arc<dyn Gateway>,
    shell: Arc<dyn Shell>,
    update_tx: Arc<tokio::sync::broadcast::Sender<()>>,
}

impl Engine {
    pub fn new(gateway: Arc<dyn Gateway>, shell: Arc<dyn Shell>) -> Self {
        let (tx, _rx) = tokio::sync::broadcast::channel(100);
        Self {
            store: Arc::new(Mutex::new(Store::new())),
            gateway,
            shell,
            update_tx: Arc::new(tx),
        }
    }

    // Helper method to safely access the store and notify observers about
    // state changes. Never held across an await point.
    fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let result = f(&mut store);
        drop(store);

        let _ = self.update_tx.send(());
        result
    }

    fn read_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        let store = match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&store)
    }

    /// A copy of the current view-model state for the rendering layer.
    pub fn snapshot(&self) -> Store {
        self.read_store(|store| store.clone())
    }

    /// Subscribe to state updates
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<()> {
        self.update_tx.subscribe()
    }

    /// Collects a line of text, trimming it; `None` on cancel or emptiness.
    fn prompt_trimmed(&self, message: &str, initial: Option<&str>) -> Option<String> {
        let raw = self.shell.prompt(message, initial)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    // Bootstrap

    /// Loads the whole hierarchy in three tiers: lists, per-list tasks,
    /// per-task subtasks.
    ///
    /// A failed child-tier fetch degrades to an empty child sequence and is
    /// only logged. A failed list-tier fetch leaves the store empty; that is
    /// a recoverable "nothing to show" state, not an error.
    pub async fn load(&self) {
        self.with_store(|store| store.set_loading(true));

        let remote_lists = match self.gateway.get_all_lists().await {
            Ok(lists) => lists,
            Err(e) => {
                tracing::warn!("failed to fetch lists: {e}");
                self.with_store(|store| {
                    store.clear();
                    store.set_loading(false);
                });
                return;
            }
        };

        let mut lists = Vec::with_capacity(remote_lists.len());
        let mut trees = Vec::with_capacity(remote_lists.len());
        for remote in remote_lists {
            let remote_tasks = match self.gateway.get_tasks_by_list(&remote.id).await {
                Ok(tasks) => tasks,
                Err(e) => {
                    tracing::warn!(list = %remote.id, "failed to fetch tasks: {e}");
                    Vec::new()
                }
            };

            // Subtask fetches touch disjoint subtrees; run them concurrently.
            let fetches = remote_tasks
                .iter()
                .map(|task| self.gateway.get_subtasks_by_task(&task.id));
            let fetched = join_all(fetches).await;

            let mut tree = TaskTree::new(remote.id.clone(), remote.title.clone());
            for (remote_task, subtasks) in remote_tasks.into_iter().zip(fetched) {
                let subtasks = match subtasks {
                    Ok(subtasks) => subtasks.into_iter().map(subtask_from_wire).collect(),
                    Err(e) => {
                        tracing::debug!(task = %remote_task.id, "failed to fetch subtasks: {e}");
                        Vec::new()
                    }
                };
                tree.tasks.push(task_from_wire(remote_task, subtasks));
            }

            lists.push(ListSummary::new(remote.id, remote.title));
            trees.push(tree);
        }

        self.with_store(|store| {
            store.replace(lists, trees);
            store.set_loading(false);
        });
    }

    /// Whether a bootstrap load is still in flight.
    pub fn loading(&self) -> bool {
        self.read_store(|store| store.loading())
    }

    // List operations

    /// Prompts for a name and creates a list.
    pub async fn create_list(&self) -> Outcome {
        let Some(title) = self.prompt_trimmed("Enter list name:", None) else {
            return Outcome::Aborted;
        };
        match self.gateway.create_list(&title).await {
            Ok(remote) => {
                self.with_store(|store| store.insert_list(remote.id, remote.title));
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("create_list failed: {e}");
                self.shell.notify("Failed to create list. Please try again.");
                Outcome::Failed
            }
        }
    }

    /// Prompts for a new name and renames a list.
    pub async fn rename_list(&self, list_id: &str) -> Outcome {
        let Some(current) = self.read_store(|store| store.list(list_id).map(|l| l.title.clone()))
        else {
            return Outcome::Aborted;
        };
        let Some(title) = self.prompt_trimmed("Enter new list name:", Some(&current)) else {
            return Outcome::Aborted;
        };
        match self.gateway.update_list(list_id, &title).await {
            Ok(remote) => {
                self.with_store(|store| store.rename_list(list_id, &remote.title));
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(list = %list_id, "rename_list failed: {e}");
                self.shell.notify("Failed to rename list. Please try again.");
                Outcome::Failed
            }
        }
    }

    /// Confirms and deletes a list; the local removal cascades through its
    /// whole subtree, matching the cascading remote delete.
    pub async fn delete_list(&self, list_id: &str) -> Outcome {
        let Some(title) = self.read_store(|store| store.list(list_id).map(|l| l.title.clone()))
        else {
            return Outcome::Aborted;
        };
        let question = format!(
            "Are you sure you want to delete the list \"{title}\"? \
             This will also delete all tasks and subtasks in this list."
        );
        if !self.shell.confirm(&question) {
            return Outcome::Aborted;
        }
        match self.gateway.delete_list(list_id).await {
            Ok(()) => {
                self.with_store(|store| store.remove_list(list_id));
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(list = %list_id, "delete_list failed: {e}");
                self.shell.notify("Failed to delete list. Please try again.");
                Outcome::Failed
            }
        }
    }

    // Task operations

    /// Prompts for task text and creates a task in the given list. The new
    /// task is inserted at the head and the list's active sort, if any, is
    /// re-applied.
    pub async fn add_task(&self, list_id: &str) -> Outcome {
        if self.read_store(|store| store.tree(list_id).is_none()) {
            return Outcome::Aborted;
        }
        let Some(text) = self.prompt_trimmed("Enter new task:", None) else {
            return Outcome::Aborted;
        };
        match self.gateway.create_task(list_id, &text).await {
            Ok(remote) => {
                let task = task_from_wire(remote, Vec::new());
                self.with_store(|store| store.insert_task(list_id, task));
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(list = %list_id, "add_task failed: {e}");
                self.shell.notify("Failed to create task");
                Outcome::Failed
            }
        }
    }

    /// Toggles a task's completion, adopting the server-returned state
    /// rather than flipping locally.
    pub async fn toggle_task(&self, list_id: &str, task_id: &str) -> Outcome {
        match self.gateway.toggle_task_completion(task_id).await {
            Ok(remote) => {
                self.with_store(|store| {
                    store.set_task_completed(list_id, task_id, remote.completed)
                });
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(task = %task_id, "toggle_task failed: {e}");
                self.shell.notify("Failed to toggle task");
                Outcome::Failed
            }
        }
    }

    /// Confirms and deletes a task.
    pub async fn delete_task(&self, list_id: &str, task_id: &str) -> Outcome {
        if !self
            .shell
            .confirm("Are you sure you want to delete this task?")
        {
            return Outcome::Aborted;
        }
        match self.gateway.delete_task(task_id).await {
            Ok(()) => {
                self.with_store(|store| store.remove_task(list_id, task_id));
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(task = %task_id, "delete_task failed: {e}");
                self.shell.notify("Failed to delete task");
                Outcome::Failed
            }
        }
    }

    /// Moves a task between lists. A purely local transformation: the
    /// gateway has no move operation, and a move to the task's own list is
    /// a no-op.
    pub fn move_task(&self, from: &str, task_id: &str, to: &str) -> Outcome {
        let moved = self.with_store(|store| store.move_task(from, task_id, to));
        if moved {
            Outcome::Applied
        } else {
            Outcome::Aborted
        }
    }

    // Subtask operations

    /// Prompts for subtask text and creates a subtask under the given task.
    pub async fn add_subtask(&self, list_id: &str, task_id: &str) -> Outcome {
        let task_exists =
            self.read_store(|store| store.tree(list_id).and_then(|t| t.task(task_id)).is_some());
        if !task_exists {
            return Outcome::Aborted;
        }
        let Some(text) = self.prompt_trimmed("Enter subtask:", None) else {
            return Outcome::Aborted;
        };
        match self.gateway.create_subtask(task_id, &text).await {
            Ok(remote) => {
                let subtask = subtask_from_wire(remote);
                self.with_store(|store| store.insert_subtask(list_id, task_id, subtask));
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(task = %task_id, "add_subtask failed: {e}");
                self.shell.notify("Failed to create subtask");
                Outcome::Failed
            }
        }
    }

    /// Toggles a subtask's completion, adopting the server-returned state.
    pub async fn toggle_subtask(&self, list_id: &str, task_id: &str, subtask_id: &str) -> Outcome {
        match self.gateway.toggle_subtask_completion(subtask_id).await {
            Ok(remote) => {
                self.with_store(|store| {
                    store.set_subtask_completed(list_id, task_id, subtask_id, remote.completed)
                });
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(subtask = %subtask_id, "toggle_subtask failed: {e}");
                self.shell.notify("Failed to toggle subtask");
                Outcome::Failed
            }
        }
    }

    /// Deletes a subtask without a confirmation step.
    pub async fn delete_subtask(&self, list_id: &str, task_id: &str, subtask_id: &str) -> Outcome {
        match self.gateway.delete_subtask(subtask_id).await {
            Ok(()) => {
                self.with_store(|store| store.remove_subtask(list_id, task_id, subtask_id));
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(subtask = %subtask_id, "delete_subtask failed: {e}");
                self.shell.notify("Failed to delete subtask");
                Outcome::Failed
            }
        }
    }

    // Local-only UI state. These never touch the gateway.

    /// Applies the sort-key transition for a list and closes its menu.
    pub fn sort_tasks(&self, list_id: &str, key: SortKey) -> bool {
        self.with_store(|store| store.apply_sort(list_id, key))
    }

    /// Removes completed tasks from a list's local view.
    pub fn clear_completed(&self, list_id: &str) -> usize {
        self.with_store(|store| store.clear_completed(list_id))
    }

    pub fn toggle_list_visibility(&self, list_id: &str) -> bool {
        self.with_store(|store| store.toggle_list_visibility(list_id))
    }

    pub fn toggle_completed_collapsed(&self, list_id: &str) -> bool {
        self.with_store(|store| store.toggle_completed_collapsed(list_id))
    }

    pub fn toggle_list_menu(&self, list_id: &str) -> bool {
        self.with_store(|store| store.toggle_list_menu(list_id))
    }

    pub fn toggle_task_menu(&self, list_id: &str, task_id: &str) -> bool {
        self.with_store(|store| store.toggle_task_menu(list_id, task_id))
    }

    /// Background click: closes every open menu.
    pub fn close_all_menus(&self) {
        self.with_store(|store| store.close_all_menus())
    }

    /// Applies a drag-reported list order.
    pub fn reorder_lists(&self, order: &[ListId]) -> bool {
        self.with_store(|store| store.reorder_lists(order))
    }

    /// Applies a drag-reported task order within one list.
    pub fn reorder_tasks(&self, list_id: &str, order: &[String]) -> bool {
        self.with_store(|store| store.reorder_tasks(list_id, order))
    }
}
