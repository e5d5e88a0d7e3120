//! Stateless heuristics behind the content tools.
//!
//! Everything here is a pure function over static tables and a seeded RNG;
//! persistence and AI calls live in the control plane.

pub mod audience;
pub mod competitors;
pub mod content;
pub mod hashtags;
pub mod keywords;
pub mod trends;

use serde::Serialize;

/// Which engine produced a piece of generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratedBy {
    Ai,
    Template,
    Rules,
}
