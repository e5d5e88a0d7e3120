//! Storage models and document names for social-mcp.
//!
//! This crate defines the persisted data model shared by the control plane,
//! the platform adapter, and the JSON document store.

pub mod models;
pub mod schema;
pub mod timestamp;

pub use models::*;
