//! Event-to-issue reconciliation runtime and handler construction.

pub mod batch;
pub mod github_api_client;
pub mod handler;
pub mod process_result;
pub mod reconcile;
pub mod runtime_config;
pub mod tracker;


pub use batch::{process_batch, BatchSummary};
pub use github_api_client::GithubApiClient;
pub use handler::{HandlerFactory, HandlerOptions, MessageHandler, ThrottleCounter};
pub use process_result::{IssueAction, ProcessResult};
pub use reconcile::{ReconcileError, ReconcileRequest, Reconciler};
pub use runtime_config::{ResolvedRuntimeConfig, RuntimeConfig, DEFAULT_MAX_COUNT};
pub use tracker::{
    CreatedIssue, IssueSearchHit, IssueSearchResults, IssueTracker, RepoRef, RepoRefError,
    TrackerError,
};
