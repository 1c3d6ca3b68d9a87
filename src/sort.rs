//! Per-list task sorting
//!
//! Each list remembers which key it was last sorted by and in which
//! direction. Re-applying the same key flips the direction; switching keys
//! resets to a key-specific default (newest-first for dates, A→Z for text).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// The available sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Case-insensitive ordering on the task text.
    Alphabetical,
    /// Ordering on `created_at`.
    Chronological,
}

/// The remembered sort state for one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: None,
            ascending: true,
        }
    }
}

impl SortState {
    /// Applies the transition rule for selecting `key`.
    ///
    /// Selecting the active key flips the direction; selecting a different
    /// key activates it with its default direction (descending for
    /// chronological, ascending for alphabetical).
    pub fn toggle(&mut self, key: SortKey) {
        match self.key {
            Some(active) if active == key => self.ascending = !self.ascending,
            _ => {
                self.key = Some(key);
                self.ascending = key != SortKey::Chronological;
            }
        }
    }
}

/// Compares two tasks under the given key, ignoring direction.
fn compare(key: SortKey, a: &Task, b: &Task) -> Ordering {
    match key {
        SortKey::Alphabetical => a.text.to_lowercase().cmp(&b.text.to_lowercase()),
        SortKey::Chronological => a.created_at.cmp(&b.created_at),
    }
}

/// Sorts tasks in place under the given key and direction.
///
/// The sort is stable: ties preserve their prior relative order, in either
/// direction (reversing the comparator leaves `Equal` untouched).
pub fn sort_tasks(tasks: &mut [Task], key: SortKey, ascending: bool) {
    tasks.sort_by(|a, b| {
        let ord = compare(key, a, b);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}
