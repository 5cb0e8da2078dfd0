use std::path::{Path, PathBuf};
use std::sync::Arc;

use aw_issues::event_message::EventMessage;
use aw_issues::item_renderer::ItemRenderer;
use aw_issues::labels::LabelSpec;
use aw_issues::sanitize::MarkdownSanitizer;
use aw_issues_runtime::{
    process_batch, GithubApiClient, HandlerFactory, HandlerOptions, IssueAction, IssueTracker,
    MessageHandler, ProcessResult, RepoRef, RuntimeConfig,
};
use httpmock::prelude::*;
use serde::Deserialize;
use serde_json::json;
use tempfile::tempdir;

const SEARCH_QUERY: &str = "repo:owner/repo is:issue is:open in:title \"[missing items] My Workflow\"";

#[derive(Debug, Deserialize)]
struct ReportedItem {
    name: String,
    reason: String,
    timestamp: String,
}

struct ReportedItemRenderer;

impl ItemRenderer for ReportedItemRenderer {
    type Item = ReportedItem;

    fn comment_header(&self, run_url: &str) -> Vec<String> {
        vec![
            "## Missing Items Reported".to_string(),
            String::new(),
            format!("Reported in [this run]({run_url}):"),
            String::new(),
        ]
    }

    fn render_comment_item(&self, item: &ReportedItem, _index: usize) -> Vec<String> {
        vec![format!("- **{}**: {} ({})", item.name, item.reason, item.timestamp)]
    }

    fn render_issue_item(&self, item: &ReportedItem, _index: usize) -> Vec<String> {
        vec![format!("- **{}**: {} ({})", item.name, item.reason, item.timestamp)]
    }
}

fn github_tracker(server: &MockServer) -> Arc<dyn IssueTracker> {
    Arc::new(
        GithubApiClient::new(
            server.base_url(),
            "test-token".to_string(),
            RepoRef::parse("owner/repo").expect("repo"),
            2_000,
        )
        .expect("github client"),
    )
}

fn reported_items_handler(
    server: &MockServer,
    template_path: &Path,
    config: RuntimeConfig,
) -> MessageHandler<ReportedItemRenderer> {
    HandlerFactory::new(HandlerOptions {
        handler_type: "missing_items".to_string(),
        default_title_prefix: "[missing items]".to_string(),
        items_field: "test_items".to_string(),
        template_path: template_path.to_path_buf(),
        items_placeholder: "test_list".to_string(),
        renderer: ReportedItemRenderer,
    })
    .build(
        &config,
        github_tracker(server),
        Arc::new(MarkdownSanitizer::default()),
    )
}

fn scenario_message() -> EventMessage {
    EventMessage::from_value(json!({
        "workflow_name": "My Workflow",
        "workflow_source": "owner/repo/.github/workflows/my-workflow.md@main",
        "workflow_source_url": "https://github.com/owner/repo/blob/main/.github/workflows/my-workflow.md",
        "run_url": "https://github.com/owner/repo/actions/runs/42",
        "test_items": [
            {"name": "item-one", "reason": "not found", "timestamp": "2026-01-01T00:00:00Z"}
        ]
    }))
}

fn workspace_templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

#[tokio::test]
async fn integration_zero_search_matches_creates_issue_with_rendered_items_and_footer() {
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/search/issues")
            .query_param("q", SEARCH_QUERY)
            .query_param("per_page", "1");
        then.status(200)
            .json_body(json!({"total_count": 0, "items": []}));
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/owner/repo/issues")
            .json_body_includes(r#"{"title": "[missing items] My Workflow"}"#)
            .json_body_includes(r#"{"labels": ["automation", "help wanted"]}"#)
            .body_includes("- **item-one**: not found (2026-01-01T00:00:00Z)")
            .body_includes("<!-- aw-expires: ");
        then.status(201).json_body(json!({
            "number": 17,
            "html_url": "https://github.com/owner/repo/issues/17"
        }));
    });

    let temp = tempdir().expect("tempdir");
    let template_path = temp.path().join("issue.md");
    std::fs::write(&template_path, "# Missing Items\n\n{{test_list}}\n").expect("template");
    let config = RuntimeConfig {
        labels: Some(LabelSpec::from("automation, help wanted")),
        ..RuntimeConfig::default()
    };
    let mut handler = reported_items_handler(&server, &template_path, config);

    let result = handler.handle(&scenario_message()).await;

    search.assert();
    create.assert();
    assert_eq!(
        result,
        ProcessResult::Reconciled {
            issue_number: 17,
            issue_url: "https://github.com/owner/repo/issues/17".to_string(),
            action: IssueAction::Created,
        }
    );
}

#[tokio::test]
async fn integration_existing_open_issue_receives_comment_instead_of_duplicate() {
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/search/issues")
            .query_param("q", SEARCH_QUERY);
        then.status(200).json_body(json!({
            "total_count": 1,
            "items": [{
                "number": 99,
                "html_url": "https://github.com/owner/repo/issues/99",
                "title": "[missing items] My Workflow"
            }]
        }));
    });
    let comment = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/owner/repo/issues/99/comments")
            .body_includes("- **item-one**: not found (2026-01-01T00:00:00Z)")
            .body_includes("> Run: https://github.com/owner/repo/actions/runs/42");
        then.status(201).json_body(json!({
            "id": 5001,
            "html_url": "https://github.com/owner/repo/issues/99#issuecomment-5001"
        }));
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/repos/owner/repo/issues");
        then.status(201)
            .json_body(json!({"number": 100, "html_url": "unexpected"}));
    });

    let temp = tempdir().expect("tempdir");
    let template_path = temp.path().join("issue.md");
    std::fs::write(&template_path, "{{test_list}}").expect("template");
    let mut handler = reported_items_handler(&server, &template_path, RuntimeConfig::default());

    let result = handler.handle(&scenario_message()).await;

    search.assert();
    comment.assert();
    create.assert_calls(0);
    assert_eq!(result.action(), Some(IssueAction::Updated));
    assert_eq!(result.issue_number(), Some(99));
}

#[tokio::test]
async fn integration_rate_limited_search_fails_one_message_and_batch_continues() {
    let server = MockServer::start();
    let limited = server.mock(|when, then| {
        when.method(GET).path("/search/issues").query_param(
            "q",
            "repo:owner/repo is:issue is:open in:title \"[missing items] Limited\"",
        );
        then.status(403).body("API rate limit exceeded");
    });
    let healthy = server.mock(|when, then| {
        when.method(GET).path("/search/issues").query_param("q", SEARCH_QUERY);
        then.status(200).json_body(json!({
            "total_count": 1,
            "items": [{"number": 5, "html_url": "https://github.com/owner/repo/issues/5"}]
        }));
    });
    let comment = server.mock(|when, then| {
        when.method(POST).path("/repos/owner/repo/issues/5/comments");
        then.status(201).json_body(json!({"id": 1}));
    });

    let temp = tempdir().expect("tempdir");
    let template_path = temp.path().join("issue.md");
    std::fs::write(&template_path, "{{test_list}}").expect("template");
    let config = RuntimeConfig {
        max: Some(2),
        ..RuntimeConfig::default()
    };
    let mut handler = reported_items_handler(&server, &template_path, config);

    let mut limited_payload = serde_json::to_value(scenario_message()).expect("json");
    limited_payload["workflow_name"] = json!("Limited");
    let summary = process_batch(
        &mut handler,
        vec![EventMessage::from_value(limited_payload), scenario_message()],
    )
    .await;

    limited.assert_calls(1);
    healthy.assert();
    comment.assert();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.updated, 1);
    let error = summary.results[0].error().expect("rate limited");
    assert!(error.contains("API rate limit exceeded"), "{error}");
}

#[tokio::test]
async fn integration_rejected_issue_create_fails_one_message_and_batch_continues() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search/issues");
        then.status(200)
            .json_body(json!({"total_count": 0, "items": []}));
    });
    let rejected = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/owner/repo/issues")
            .json_body_includes(r#"{"title": "[missing items] Rejected"}"#);
        then.status(422)
            .json_body(json!({"message": "Validation Failed"}));
    });
    let accepted = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/owner/repo/issues")
            .json_body_includes(r#"{"title": "[missing items] My Workflow"}"#);
        then.status(201).json_body(json!({
            "number": 21,
            "html_url": "https://github.com/owner/repo/issues/21"
        }));
    });

    let temp = tempdir().expect("tempdir");
    let template_path = temp.path().join("issue.md");
    std::fs::write(&template_path, "{{test_list}}").expect("template");
    let config = RuntimeConfig {
        max: Some(2),
        ..RuntimeConfig::default()
    };
    let mut handler = reported_items_handler(&server, &template_path, config);

    let mut rejected_payload = serde_json::to_value(scenario_message()).expect("json");
    rejected_payload["workflow_name"] = json!("Rejected");
    let summary = process_batch(
        &mut handler,
        vec![EventMessage::from_value(rejected_payload), scenario_message()],
    )
    .await;

    rejected.assert_calls(1);
    accepted.assert();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.created, 1);
    let error = summary.results[0].error().expect("create rejected");
    assert!(error.starts_with("failed to create issue:"), "{error}");
    assert!(error.contains("422"), "{error}");
    assert_eq!(summary.results[1].issue_number(), Some(21));
}

#[tokio::test]
async fn integration_builtin_missing_tool_template_renders_through_github_api() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search/issues");
        then.status(200)
            .json_body(json!({"total_count": 0, "items": []}));
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/owner/repo/issues")
            .json_body_includes(r#"{"title": "[missing tool] Nightly Triage"}"#)
            .body_includes("# Missing Tools Reported")
            .body_includes("#### 1. `docker`")
            .body_includes("**Alternatives:** podman")
            .body_includes("AI generated by [Nightly Triage](#)");
        then.status(201).json_body(json!({
            "number": 3,
            "html_url": "https://github.com/owner/repo/issues/3"
        }));
    });

    let mut handler = HandlerFactory::new(HandlerOptions::missing_tool(&workspace_templates_dir()))
        .build(
            &RuntimeConfig::default(),
            github_tracker(&server),
            Arc::new(MarkdownSanitizer::default()),
        );
    let result = handler
        .handle(&EventMessage::from_value(json!({
            "workflow_name": "Nightly Triage",
            "run_url": "https://github.com/owner/repo/actions/runs/7",
            "missing_tools": [
                {"tool": "docker", "reason": "container build step", "alternatives": "podman"}
            ]
        })))
        .await;

    create.assert();
    assert_eq!(result.action(), Some(IssueAction::Created));
    assert_eq!(result.issue_number(), Some(3));
}
