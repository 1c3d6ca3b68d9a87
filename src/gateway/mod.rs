//! Remote gateway module
//!
//! The persistence boundary: an async CRUD/toggle interface per entity kind,
//! its wire representation, and an HTTP implementation.

mod http;
mod trait_def;
mod wire;

// Re-export the trait and types
pub use http::{GatewayConfig, HttpGateway};
pub use trait_def::{Gateway, GatewayError};
pub use wire::{subtask_from_wire, task_from_wire, RemoteList, RemoteSubtask, RemoteTask};
