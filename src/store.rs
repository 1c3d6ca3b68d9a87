//! The entity store
//!
//! Holds the two parallel collections (list summaries and task trees) plus
//! the transient UI state: the single open-menu reference, the per-list sort
//! states, and the loading flag. Every method is a pure, synchronous
//! transformation; persistence ordering is the sync engine's concern.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{ListId, ListSummary, OpenMenu, Subtask, Task, TaskTree};
use crate::sort::{sort_tasks, SortKey, SortState};

/// In-memory view-model state for the whole hierarchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    lists: Vec<ListSummary>,
    trees: Vec<TaskTree>,
    open_menu: OpenMenu,
    sort_states: HashMap<ListId, SortState>,
    loading: bool,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // Read access

    pub fn lists(&self) -> &[ListSummary] {
        &self.lists
    }

    pub fn trees(&self) -> &[TaskTree] {
        &self.trees
    }

    pub fn list(&self, list_id: &str) -> Option<&ListSummary> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn tree(&self, list_id: &str) -> Option<&TaskTree> {
        self.trees.iter().find(|t| t.id == list_id)
    }

    pub fn open_menu(&self) -> &OpenMenu {
        &self.open_menu
    }

    /// The remembered sort state for a list, defaulting to unsorted.
    pub fn sort_state(&self, list_id: &str) -> SortState {
        self.sort_states.get(list_id).copied().unwrap_or_default()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    fn list_mut(&mut self, list_id: &str) -> Option<&mut ListSummary> {
        self.lists.iter_mut().find(|l| l.id == list_id)
    }

    fn tree_mut(&mut self, list_id: &str) -> Option<&mut TaskTree> {
        self.trees.iter_mut().find(|t| t.id == list_id)
    }

    // Lifecycle

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replaces both collections wholesale (bootstrap) and recounts.
    pub(crate) fn replace(&mut self, lists: Vec<ListSummary>, trees: Vec<TaskTree>) {
        self.lists = lists;
        self.trees = trees;
        self.open_menu = OpenMenu::None;
        self.sort_states.clear();
        self.recount_all();
    }

    pub(crate) fn clear(&mut self) {
        self.replace(Vec::new(), Vec::new());
    }

    // List transformations

    /// Inserts a freshly created list: summary and empty tree together.
    pub(crate) fn insert_list(&mut self, id: ListId, title: String) {
        self.lists.push(ListSummary::new(id.clone(), title.clone()));
        self.trees.push(TaskTree::new(id, title));
    }

    /// Renames a list in both collections and closes its menu.
    pub(crate) fn rename_list(&mut self, list_id: &str, title: &str) -> bool {
        let Some(list) = self.list_mut(list_id) else {
            return false;
        };
        list.title = title.to_string();
        if let Some(tree) = self.tree_mut(list_id) {
            tree.title = title.to_string();
        }
        if self.open_menu.is_list(list_id) {
            self.open_menu = OpenMenu::None;
        }
        true
    }

    /// Removes a list and its entire subtree from both collections.
    pub(crate) fn remove_list(&mut self, list_id: &str) -> bool {
        let before = self.lists.len();
        self.lists.retain(|l| l.id != list_id);
        self.trees.retain(|t| t.id != list_id);
        self.sort_states.remove(list_id);
        if self.open_menu.is_within_list(list_id) {
            self.open_menu = OpenMenu::None;
        }
        self.lists.len() != before
    }

    /// Flips a list's visibility flag.
    pub fn toggle_list_visibility(&mut self, list_id: &str) -> bool {
        match self.list_mut(list_id) {
            Some(list) => {
                list.visible = !list.visible;
                true
            }
            None => false,
        }
    }

    /// Flips a tree's completed-section collapse flag.
    pub fn toggle_completed_collapsed(&mut self, list_id: &str) -> bool {
        match self.tree_mut(list_id) {
            Some(tree) => {
                tree.completed_collapsed = !tree.completed_collapsed;
                true
            }
            None => false,
        }
    }

    // Task transformations

    /// Inserts a confirmed task at the head of its list, then re-applies the
    /// list's active sort so the displayed order never drifts from the
    /// chosen key. Recounts.
    pub(crate) fn insert_task(&mut self, list_id: &str, task: Task) -> bool {
        let state = self.sort_state(list_id);
        let Some(tree) = self.tree_mut(list_id) else {
            return false;
        };
        tree.tasks.insert(0, task);
        if let Some(key) = state.key {
            sort_tasks(&mut tree.tasks, key, state.ascending);
        }
        self.recount(list_id);
        true
    }

    /// Sets a task's completion state to the server-confirmed value.
    pub(crate) fn set_task_completed(
        &mut self,
        list_id: &str,
        task_id: &str,
        completed: bool,
    ) -> bool {
        match self.tree_mut(list_id).and_then(|t| t.task_mut(task_id)) {
            Some(task) => {
                task.completed = completed;
                true
            }
            None => false,
        }
    }

    /// Removes a task from its list, returning it. Recounts.
    pub(crate) fn remove_task(&mut self, list_id: &str, task_id: &str) -> Option<Task> {
        let tree = self.tree_mut(list_id)?;
        let pos = tree.tasks.iter().position(|t| t.id == task_id)?;
        let removed = tree.tasks.remove(pos);
        if self.open_menu.is_task(list_id, task_id) {
            self.open_menu = OpenMenu::None;
        }
        self.recount(list_id);
        Some(removed)
    }

    /// Moves a task from one list to the end of another.
    ///
    /// A no-op when source and destination are identical or either side is
    /// missing. The moved task's menu, if open, is closed. Recounts both.
    pub fn move_task(&mut self, from: &str, task_id: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        if self.tree(to).is_none() {
            return false;
        }
        let Some(task) = self.remove_task(from, task_id) else {
            return false;
        };
        // remove_task already cleared the menu reference and recounted the
        // source list.
        let dest = self.tree_mut(to).expect("destination checked above");
        dest.tasks.push(task);
        self.recount(to);
        true
    }

    /// Removes every completed task from a list locally and closes its menu.
    /// Returns the number of removed tasks.
    pub fn clear_completed(&mut self, list_id: &str) -> usize {
        let Some(tree) = self.tree_mut(list_id) else {
            return 0;
        };
        let before = tree.tasks.len();
        tree.tasks.retain(|t| !t.completed);
        let removed = before - tree.tasks.len();
        if self.open_menu.is_within_list(list_id) {
            self.open_menu = OpenMenu::None;
        }
        self.recount(list_id);
        removed
    }

    // Subtask transformations

    /// Appends a confirmed subtask and closes the owning task's menu (the
    /// add action is taken from that menu).
    pub(crate) fn insert_subtask(&mut self, list_id: &str, task_id: &str, subtask: Subtask) -> bool {
        let Some(task) = self.tree_mut(list_id).and_then(|t| t.task_mut(task_id)) else {
            return false;
        };
        task.subtasks.push(subtask);
        if self.open_menu.is_task(list_id, task_id) {
            self.open_menu = OpenMenu::None;
        }
        true
    }

    /// Sets a subtask's completion state to the server-confirmed value.
    pub(crate) fn set_subtask_completed(
        &mut self,
        list_id: &str,
        task_id: &str,
        subtask_id: &str,
        completed: bool,
    ) -> bool {
        let subtask = self
            .tree_mut(list_id)
            .and_then(|t| t.task_mut(task_id))
            .and_then(|t| t.subtasks.iter_mut().find(|s| s.id == subtask_id));
        match subtask {
            Some(subtask) => {
                subtask.completed = completed;
                true
            }
            None => false,
        }
    }

    /// Removes a subtask from its task.
    pub(crate) fn remove_subtask(&mut self, list_id: &str, task_id: &str, subtask_id: &str) -> bool {
        let Some(task) = self.tree_mut(list_id).and_then(|t| t.task_mut(task_id)) else {
            return false;
        };
        let before = task.subtasks.len();
        task.subtasks.retain(|s| s.id != subtask_id);
        task.subtasks.len() != before
    }

    // Menu exclusivity

    /// Opens a list's menu, closing whatever else was open; closes it if it
    /// was already the open one.
    pub fn toggle_list_menu(&mut self, list_id: &str) -> bool {
        if self.list(list_id).is_none() {
            return false;
        }
        self.open_menu = if self.open_menu.is_list(list_id) {
            OpenMenu::None
        } else {
            OpenMenu::List(list_id.to_string())
        };
        true
    }

    /// Opens a task's menu, closing whatever else was open; closes it if it
    /// was already the open one.
    pub fn toggle_task_menu(&mut self, list_id: &str, task_id: &str) -> bool {
        let exists = self
            .tree(list_id)
            .and_then(|t| t.task(task_id))
            .is_some();
        if !exists {
            return false;
        }
        self.open_menu = if self.open_menu.is_task(list_id, task_id) {
            OpenMenu::None
        } else {
            OpenMenu::Task {
                list: list_id.to_string(),
                task: task_id.to_string(),
            }
        };
        true
    }

    /// Background click: closes every menu.
    pub fn close_all_menus(&mut self) {
        self.open_menu = OpenMenu::None;
    }

    // Sorting

    /// Applies the sort-key transition for a list, re-sorts its tasks, and
    /// closes the list's menu (the sort was selected from it).
    pub fn apply_sort(&mut self, list_id: &str, key: SortKey) -> bool {
        if self.tree(list_id).is_none() {
            return false;
        }
        let mut state = self.sort_state(list_id);
        state.toggle(key);
        self.sort_states.insert(list_id.to_string(), state);

        let ascending = state.ascending;
        let tree = self.tree_mut(list_id).expect("tree checked above");
        sort_tasks(&mut tree.tasks, key, ascending);

        if self.open_menu.is_list(list_id) {
            self.open_menu = OpenMenu::None;
        }
        true
    }

    // Drag reordering

    /// Applies an externally produced list order. Ignored unless `order` is
    /// a permutation of the current list ids.
    pub fn reorder_lists(&mut self, order: &[ListId]) -> bool {
        if !is_permutation(order, self.lists.iter().map(|l| l.id.as_str())) {
            return false;
        }
        self.lists.sort_by_key(|l| position(order, &l.id));
        self.trees.sort_by_key(|t| position(order, &t.id));
        true
    }

    /// Applies an externally produced task order within one list. Ignored
    /// unless `order` is a permutation of the list's task ids. A manual
    /// order overrides the active sort, so the remembered key is cleared.
    pub fn reorder_tasks(&mut self, list_id: &str, order: &[String]) -> bool {
        let Some(tree) = self.tree_mut(list_id) else {
            return false;
        };
        if !is_permutation(order, tree.tasks.iter().map(|t| t.id.as_str())) {
            return false;
        }
        tree.tasks.sort_by_key(|t| position(order, &t.id));
        self.sort_states.remove(list_id);
        true
    }

    // Invariant maintenance

    /// Re-derives one list's cached count from its tree.
    pub(crate) fn recount(&mut self, list_id: &str) {
        let count = self.tree(list_id).map(|t| t.tasks.len());
        if let (Some(count), Some(list)) = (count, self.list_mut(list_id)) {
            list.count = count;
        }
    }

    /// Re-derives every cached count; run after bootstrap.
    pub(crate) fn recount_all(&mut self) {
        let counts: Vec<(ListId, usize)> = self
            .trees
            .iter()
            .map(|t| (t.id.clone(), t.tasks.len()))
            .collect();
        for (id, count) in counts {
            if let Some(list) = self.list_mut(&id) {
                list.count = count;
            }
        }
    }
}

fn position(order: &[String], id: &str) -> usize {
    order.iter().position(|o| o == id).unwrap_or(usize::MAX)
}

fn is_permutation<'a>(order: &[String], current: impl Iterator<Item = &'a str>) -> bool {
    let want: HashSet<&str> = order.iter().map(|s| s.as_str()).collect();
    let have: HashSet<&str> = current.collect();
    want.len() == order.len() && want == have
}
