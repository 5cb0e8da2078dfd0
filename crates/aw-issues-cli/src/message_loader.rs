use std::path::Path;

use anyhow::{bail, Context, Result};
use aw_issues::event_message::EventMessage;
use aw_issues_runtime::RuntimeConfig;
use serde_json::Value;

/// Parse a batch of event messages.
///
/// Accepts a JSON array of messages, a single JSON object, or one JSON
/// object per line. Blank lines are skipped.
pub(crate) fn parse_event_messages(raw: &str) -> Result<Vec<EventMessage>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(entries) => Ok(entries.into_iter().map(EventMessage::from_value).collect()),
            Value::Object(_) => Ok(vec![EventMessage::from_value(value)]),
            other => bail!("event messages must be JSON objects, found {other}"),
        };
    }

    trimmed
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<Value>(line)
                .map(EventMessage::from_value)
                .with_context(|| format!("invalid event message on line {}", index + 1))
        })
        .collect()
}

pub(crate) fn load_event_messages(path: &Path) -> Result<Vec<EventMessage>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event messages {}", path.display()))?;
    parse_event_messages(&raw)
        .with_context(|| format!("failed to parse event messages {}", path.display()))
}

pub(crate) fn load_runtime_config(path: &Path) -> Result<RuntimeConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read runtime config {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse runtime config {}", path.display()))
}
