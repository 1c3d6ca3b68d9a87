//! Nestlist library crate
//!
//! A client-side synchronization engine for a three-level to-do hierarchy
//! (lists → tasks → subtasks). The engine keeps an in-memory view model
//! consistent with a remote persistence service: mutations are confirmed by
//! the gateway before any local state changes, per-list sorting is
//! remembered and re-applied, and at most one settings menu is open across
//! the whole hierarchy at any time.

pub mod cli;
pub mod engine;
pub mod gateway;
pub mod models;
pub mod shell;
pub mod sort;
pub mod store;

// Re-export commonly used types
pub use engine::{Engine, Outcome};
pub use gateway::{Gateway, GatewayConfig, GatewayError, HttpGateway};
pub use models::{ListSummary, OpenMenu, Subtask, Task, TaskTree};
pub use shell::{Shell, TerminalShell};
pub use sort::{SortKey, SortState};
pub use store::Store;
