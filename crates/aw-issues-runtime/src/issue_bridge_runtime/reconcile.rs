use std::path::{Path, PathBuf};

use aw_issues::footer::{build_footer_now, DEFAULT_ISSUE_EXPIRES_HOURS};
use aw_issues::github_transport_helpers::build_open_issue_search_query;
use aw_issues::issue_render::{
    build_issue_template_context, issue_title, render_comment_body, render_issue_footer_text,
    render_issue_items_block, WorkflowRunView,
};
use aw_issues::item_renderer::ItemRenderer;
use aw_issues::sanitize::ContentSanitizer;
use aw_issues::template::render_template;
use thiserror::Error;
use tracing::{info, warn};

use super::process_result::{IssueAction, ProcessResult};
use super::tracker::{IssueSearchHit, IssueTracker, TrackerError};

/// Search page size; only the most recent match matters.
const SEARCH_PAGE_SIZE: u32 = 1;

#[derive(Debug, Error)]
/// Collaborator failures surfaced while reconciling one message.
pub enum ReconcileError {
    #[error("failed to search for existing issue: {0}")]
    Search(#[source] TrackerError),
    #[error("failed to comment on issue #{issue_number}: {source}")]
    Comment {
        issue_number: u64,
        #[source]
        source: TrackerError,
    },
    #[error("failed to read issue template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create issue: {0}")]
    Create(#[source] TrackerError),
}

#[derive(Debug)]
/// Validated fields of one message, ready to reconcile.
pub struct ReconcileRequest<'a, I> {
    pub title_prefix: &'a str,
    pub labels: &'a [String],
    pub run: WorkflowRunView<'a>,
    pub items: &'a [I],
}

impl<I> Clone for ReconcileRequest<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for ReconcileRequest<'_, I> {}

/// Search-then-branch engine: comment on the open issue for a workflow or open a new one.
pub struct Reconciler<'a, R: ItemRenderer> {
    pub handler_type: &'a str,
    pub tracker: &'a dyn IssueTracker,
    pub sanitizer: &'a dyn ContentSanitizer,
    pub renderer: &'a R,
    pub template_path: &'a Path,
    pub items_placeholder: &'a str,
}

impl<R: ItemRenderer> Reconciler<'_, R> {
    /// Reconcile one message. Collaborator errors are logged and returned as failures.
    pub async fn reconcile(&self, request: ReconcileRequest<'_, R::Item>) -> ProcessResult {
        match self.try_reconcile(request).await {
            Ok(result) => result,
            Err(error) => {
                warn!(
                    handler = self.handler_type,
                    workflow = request.run.workflow_name,
                    error = %error,
                    "failed to reconcile event message"
                );
                ProcessResult::failed(error.to_string())
            }
        }
    }

    async fn try_reconcile(
        &self,
        request: ReconcileRequest<'_, R::Item>,
    ) -> Result<ProcessResult, ReconcileError> {
        let title = issue_title(request.title_prefix, request.run.workflow_name);
        let query = build_open_issue_search_query(&self.tracker.repo_slug(), &title);
        let search = self
            .tracker
            .search_issues(&query, SEARCH_PAGE_SIZE)
            .await
            .map_err(ReconcileError::Search)?;

        match search.first_match() {
            Some(existing) => self.append_to_existing(existing, request).await,
            None => self.open_new_issue(&title, request).await,
        }
    }

    async fn append_to_existing(
        &self,
        existing: &IssueSearchHit,
        request: ReconcileRequest<'_, R::Item>,
    ) -> Result<ProcessResult, ReconcileError> {
        let body = render_comment_body(self.renderer, request.run, request.items);
        let body = self.sanitizer.sanitize(&body);
        self.tracker
            .create_issue_comment(existing.number, &body)
            .await
            .map_err(|source| ReconcileError::Comment {
                issue_number: existing.number,
                source,
            })?;
        info!(
            handler = self.handler_type,
            issue_number = existing.number,
            items = request.items.len(),
            "appended event items to existing issue"
        );
        Ok(ProcessResult::Reconciled {
            issue_number: existing.number,
            issue_url: existing.html_url.clone(),
            action: IssueAction::Updated,
        })
    }

    async fn open_new_issue(
        &self,
        title: &str,
        request: ReconcileRequest<'_, R::Item>,
    ) -> Result<ProcessResult, ReconcileError> {
        let template = tokio::fs::read_to_string(self.template_path)
            .await
            .map_err(|source| ReconcileError::Template {
                path: self.template_path.to_path_buf(),
                source,
            })?;
        let items_block = render_issue_items_block(self.renderer, request.items);
        let context = build_issue_template_context(request.run, self.items_placeholder, items_block);
        // The footer goes on after sanitizing so truncation never drops the expiration marker.
        let mut body = self.sanitizer.sanitize(&render_template(&template, &context));
        let footer_text = self.sanitizer.sanitize(&render_issue_footer_text(request.run));
        body.push_str(&build_footer_now(&footer_text, DEFAULT_ISSUE_EXPIRES_HOURS));

        let created = self
            .tracker
            .create_issue(title, &body, request.labels)
            .await
            .map_err(ReconcileError::Create)?;
        info!(
            handler = self.handler_type,
            issue_number = created.number,
            labels = request.labels.len(),
            "opened new issue for event message"
        );
        Ok(ProcessResult::Reconciled {
            issue_number: created.number,
            issue_url: created.html_url,
            action: IssueAction::Created,
        })
    }
}
