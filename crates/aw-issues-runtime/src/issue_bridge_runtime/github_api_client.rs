use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aw_issues::github_transport_helpers::truncate_for_error;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::json;

use super::tracker::{CreatedIssue, IssueSearchResults, IssueTracker, RepoRef, TrackerError};

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Clone)]
/// GitHub REST client implementing [`IssueTracker`].
///
/// Each call is sent once; failures are returned to the caller untouched.
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
    repo: RepoRef,
}

impl GithubApiClient {
    pub fn new(
        api_base: String,
        token: String,
        repo: RepoRef,
        request_timeout_ms: u64,
    ) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("aw-issues-bridge"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .context("invalid github authorization header")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create github api client")?;
        Ok(Self {
            http: client,
            api_base: api_base.trim_end_matches('/').to_string(),
            repo,
        })
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    async fn request_json<T>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, TrackerError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|source| TrackerError::Transport { operation, source })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::Status {
                operation,
                status: status.as_u16(),
                body: truncate_for_error(&body, 800),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|error| TrackerError::Decode {
                operation,
                detail: error.to_string(),
            })
    }
}

#[async_trait]
impl IssueTracker for GithubApiClient {
    fn repo_slug(&self) -> String {
        self.repo.as_slug()
    }

    async fn search_issues(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<IssueSearchResults, TrackerError> {
        let per_page = per_page.max(1).to_string();
        let request = self
            .http
            .get(format!("{}/search/issues", self.api_base))
            .query(&[
                ("q", query),
                ("sort", "updated"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ]);
        self.request_json("search issues", request).await
    }

    async fn create_issue_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> Result<(), TrackerError> {
        let request = self
            .http
            .post(format!(
                "{}/repos/{}/{}/issues/{}/comments",
                self.api_base, self.repo.owner, self.repo.name, issue_number
            ))
            .json(&json!({ "body": body }));
        let _: IgnoredAny = self.request_json("create issue comment", request).await?;
        Ok(())
    }

    async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<CreatedIssue, TrackerError> {
        let request = self
            .http
            .post(format!(
                "{}/repos/{}/{}/issues",
                self.api_base, self.repo.owner, self.repo.name
            ))
            .json(&json!({
                "title": title,
                "body": body,
                "labels": labels,
            }));
        self.request_json("create issue", request).await
    }
}
