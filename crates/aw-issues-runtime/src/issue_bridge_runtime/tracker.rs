use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
/// `owner/repo` coordinates of the repository issues are filed in.
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid github repository '{raw}', expected owner/repo")]
pub struct RepoRefError {
    pub raw: String,
}

impl RepoRef {
    pub fn parse(raw: &str) -> Result<Self, RepoRefError> {
        let invalid = || RepoRefError {
            raw: raw.to_string(),
        };
        let (owner, name) = raw.trim().split_once('/').ok_or_else(invalid)?;
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Error)]
/// Failure of a single tracker API call.
pub enum TrackerError {
    #[error("github api {operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("github api {operation} failed with status {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },
    #[error("failed to decode github {operation}: {detail}")]
    Decode {
        operation: &'static str,
        detail: String,
    },
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueSearchHit {
    pub number: u64,
    pub html_url: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssueSearchResults {
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<IssueSearchHit>,
}

impl IssueSearchResults {
    /// First hit, if the search matched anything.
    pub fn first_match(&self) -> Option<&IssueSearchHit> {
        if self.total_count == 0 {
            return None;
        }
        self.items.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    pub number: u64,
    pub html_url: String,
}

#[async_trait]
/// Issue tracker operations the reconciliation engine depends on.
pub trait IssueTracker: Send + Sync {
    /// Repository slug scoped into search queries.
    fn repo_slug(&self) -> String;

    async fn search_issues(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<IssueSearchResults, TrackerError>;

    async fn create_issue_comment(&self, issue_number: u64, body: &str)
        -> Result<(), TrackerError>;

    async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<CreatedIssue, TrackerError>;
}
