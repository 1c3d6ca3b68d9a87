//! Gateway trait definition
//!
//! This module defines the `Gateway` trait that abstracts over the remote
//! persistence service. All calls are asynchronous and may fail; the sync
//! engine never mutates local state until a call has succeeded.

use super::wire::{RemoteList, RemoteSubtask, RemoteTask};

/// Gateway errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Missing data in response")]
    MissingData,
}

/// The remote persistence boundary for the three-level hierarchy.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// Create a new list
    async fn create_list(&self, title: &str) -> Result<RemoteList, GatewayError>;

    /// Rename an existing list
    async fn update_list(&self, id: &str, title: &str) -> Result<RemoteList, GatewayError>;

    /// Delete a list; the remote delete cascades to its tasks and subtasks
    async fn delete_list(&self, id: &str) -> Result<(), GatewayError>;

    /// Create a task in a list
    async fn create_task(&self, list_id: &str, text: &str) -> Result<RemoteTask, GatewayError>;

    /// Flip a task's completion state, returning the confirmed state
    async fn toggle_task_completion(&self, task_id: &str) -> Result<RemoteTask, GatewayError>;

    /// Delete a task
    async fn delete_task(&self, task_id: &str) -> Result<(), GatewayError>;

    /// Create a subtask under a task
    async fn create_subtask(&self, task_id: &str, text: &str)
        -> Result<RemoteSubtask, GatewayError>;

    /// Flip a subtask's completion state, returning the confirmed state
    async fn toggle_subtask_completion(
        &self,
        subtask_id: &str,
    ) -> Result<RemoteSubtask, GatewayError>;

    /// Delete a subtask
    async fn delete_subtask(&self, subtask_id: &str) -> Result<(), GatewayError>;

    /// Fetch all lists
    async fn get_all_lists(&self) -> Result<Vec<RemoteList>, GatewayError>;

    /// Fetch the tasks of one list
    async fn get_tasks_by_list(&self, list_id: &str) -> Result<Vec<RemoteTask>, GatewayError>;

    /// Fetch the subtasks of one task
    async fn get_subtasks_by_task(&self, task_id: &str)
        -> Result<Vec<RemoteSubtask>, GatewayError>;
}
