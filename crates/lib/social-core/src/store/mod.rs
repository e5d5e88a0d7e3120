//! Store interfaces and the JSON document implementation.
//!
//! Every entity kind lives in one JSON document that is read and rewritten
//! wholesale. Writers are serialized through a per-store async mutex.

pub mod json;

pub use json::{DocumentKind, JsonDocStore, StoreError, StoreResult};
