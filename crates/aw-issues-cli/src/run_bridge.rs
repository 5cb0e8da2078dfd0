use std::sync::Arc;

use anyhow::{bail, Context, Result};
use aw_issues::event_kinds::EventKind;
use aw_issues::event_message::EventMessage;
use aw_issues::item_renderer::ItemRenderer;
use aw_issues::sanitize::MarkdownSanitizer;
use aw_issues_runtime::{
    process_batch, BatchSummary, GithubApiClient, HandlerFactory, HandlerOptions, IssueTracker,
    RepoRef, RuntimeConfig,
};
use tracing::info;

use crate::cli_args::Cli;
use crate::message_loader::{load_event_messages, load_runtime_config};

pub(crate) async fn run_cli(cli: Cli) -> Result<()> {
    let repo = RepoRef::parse(&cli.github_repo)?;
    let tracker: Arc<dyn IssueTracker> = Arc::new(
        GithubApiClient::new(
            cli.github_api_base.clone(),
            cli.github_token.clone(),
            repo,
            cli.request_timeout_ms,
        )
        .context("failed to initialize github client")?,
    );
    let config = match cli.config.as_deref() {
        Some(path) => load_runtime_config(path)?,
        None => RuntimeConfig::default(),
    }
    .merged_with(cli.runtime_config_overrides());
    let messages = load_event_messages(&cli.messages)?;
    info!(
        messages = messages.len(),
        kind = ?cli.kind,
        "loaded event messages"
    );

    let summary = match EventKind::from(cli.kind) {
        EventKind::MissingTool => {
            let options = HandlerOptions::missing_tool(&cli.template_dir);
            run_event_batch(&cli, options, &config, tracker, messages).await
        }
        EventKind::MissingData => {
            let options = HandlerOptions::missing_data(&cli.template_dir);
            run_event_batch(&cli, options, &config, tracker, messages).await
        }
    };

    let rendered =
        serde_json::to_string_pretty(&summary).context("failed to encode batch summary")?;
    println!("{rendered}");
    if cli.fail_on_error && !summary.all_succeeded() {
        bail!("{} of {} event messages failed", summary.failed, summary.results.len());
    }
    Ok(())
}

async fn run_event_batch<R: ItemRenderer>(
    cli: &Cli,
    mut options: HandlerOptions<R>,
    config: &RuntimeConfig,
    tracker: Arc<dyn IssueTracker>,
    messages: Vec<EventMessage>,
) -> BatchSummary {
    if let Some(template) = &cli.template {
        options.template_path = template.clone();
    }
    let factory = HandlerFactory::new(options);
    let mut handler = factory.build(config, tracker, Arc::new(MarkdownSanitizer::default()));
    process_batch(&mut handler, messages).await
}
