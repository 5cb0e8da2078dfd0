//! Shared helpers for the agentic-workflow issue bridge.
//! This crate provides the message model, label/template/footer utilities,
//! content sanitization, and issue/comment body rendering consumed by the
//! runtime crate. Nothing in here performs I/O.

pub mod event_kinds;
pub mod event_message;
pub mod footer;
pub mod github_transport_helpers;
pub mod issue_render;
pub mod item_renderer;
pub mod labels;
pub mod sanitize;
pub mod template;
