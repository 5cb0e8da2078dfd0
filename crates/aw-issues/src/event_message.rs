use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const WORKFLOW_NAME_FIELD: &str = "workflow_name";
pub const WORKFLOW_SOURCE_FIELD: &str = "workflow_source";
pub const WORKFLOW_SOURCE_URL_FIELD: &str = "workflow_source_url";
pub const RUN_URL_FIELD: &str = "run_url";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// One event reported by an agent during a workflow run.
///
/// The message stays a JSON object because the name of its items field is
/// chosen per event kind rather than fixed by this type.
pub struct EventMessage {
    fields: Map<String, Value>,
}

impl EventMessage {
    /// Wrap a decoded JSON value. Anything other than an object yields an empty message.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the workflow name when present as a non-empty string.
    pub fn workflow_name(&self) -> Option<&str> {
        self.non_empty_str(WORKFLOW_NAME_FIELD)
    }

    pub fn workflow_source(&self) -> &str {
        self.str_or_empty(WORKFLOW_SOURCE_FIELD)
    }

    pub fn workflow_source_url(&self) -> &str {
        self.str_or_empty(WORKFLOW_SOURCE_URL_FIELD)
    }

    pub fn run_url(&self) -> &str {
        self.str_or_empty(RUN_URL_FIELD)
    }

    /// Returns the items array stored under `field` when it is a non-empty array.
    pub fn items(&self, field: &str) -> Option<&[Value]> {
        match self.fields.get(field) {
            Some(Value::Array(items)) if !items.is_empty() => Some(items.as_slice()),
            _ => None,
        }
    }

    fn non_empty_str(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    fn str_or_empty(&self, field: &str) -> &str {
        self.fields.get(field).and_then(Value::as_str).unwrap_or("")
    }
}

impl From<Value> for EventMessage {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
