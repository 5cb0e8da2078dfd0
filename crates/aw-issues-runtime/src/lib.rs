//! Runtime for the agentic-workflow issue bridge.
//!
//! Turns agent-reported event messages into GitHub issues: each message is
//! either appended as a comment to the open issue carrying the workflow's
//! title or opened as a new issue rendered from a template.

mod issue_bridge_runtime;

pub use issue_bridge_runtime::*;
