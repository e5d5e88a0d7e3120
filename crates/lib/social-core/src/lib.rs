//! Core services for social-mcp.
//!
//! The [`control::SocialControlPlane`] implements every tool operation on top
//! of a flat-file JSON store, a platform adapter that falls back to
//! deterministic mock data, and an optional AI completion client. The MCP
//! layer only maps parameters in and errors out.

pub mod ai;
pub mod control;
pub mod features;
pub mod http;
pub mod params;
pub mod platforms;
pub mod seed;
pub mod services;
pub mod store;
