//! MCP tool modules.
//!
//! Tools are grouped by domain: post scheduling, hashtags, analytics and
//! insights, content planning, competitor tracking, and contextual help.

mod competitors;
mod content;
mod context;
mod hashtags;
mod insights;
mod posts;
