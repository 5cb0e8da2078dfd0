use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `IssueAction` values.
pub enum IssueAction {
    Created,
    Updated,
}

impl IssueAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of handling one event message.
///
/// Serializes to `{"success":true,"issue_number":..,"issue_url":..,"action":..}`
/// or `{"success":false,"error":..}`.
pub enum ProcessResult {
    Reconciled {
        issue_number: u64,
        issue_url: String,
        action: IssueAction,
    },
    Failed {
        error: String,
    },
}

impl ProcessResult {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Reconciled { .. })
    }

    pub fn action(&self) -> Option<IssueAction> {
        match self {
            Self::Reconciled { action, .. } => Some(*action),
            Self::Failed { .. } => None,
        }
    }

    pub fn issue_number(&self) -> Option<u64> {
        match self {
            Self::Reconciled { issue_number, .. } => Some(*issue_number),
            Self::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Reconciled { .. } => None,
            Self::Failed { error } => Some(error.as_str()),
        }
    }
}

#[derive(Serialize)]
struct ProcessResultRecord<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<IssueAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for ProcessResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = match self {
            Self::Reconciled {
                issue_number,
                issue_url,
                action,
            } => ProcessResultRecord {
                success: true,
                issue_number: Some(*issue_number),
                issue_url: Some(issue_url.as_str()),
                action: Some(*action),
                error: None,
            },
            Self::Failed { error } => ProcessResultRecord {
                success: false,
                issue_number: None,
                issue_url: None,
                action: None,
                error: Some(error.as_str()),
            },
        };
        record.serialize(serializer)
    }
}
