use std::path::PathBuf;

use aw_issues::event_kinds::EventKind;
use aw_issues::labels::{LabelDedup, LabelSpec};
use aw_issues_runtime::RuntimeConfig;
use clap::{Parser, ValueEnum};

fn parse_positive_count(value: &str) -> Result<u32, String> {
    let parsed = value
        .parse::<u32>()
        .map_err(|error| format!("failed to parse count: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliEventKind {
    MissingTool,
    MissingData,
}

impl From<CliEventKind> for EventKind {
    fn from(value: CliEventKind) -> Self {
        match value {
            CliEventKind::MissingTool => EventKind::MissingTool,
            CliEventKind::MissingData => EventKind::MissingData,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliLabelDedup {
    Preserve,
    Deduplicate,
}

impl From<CliLabelDedup> for LabelDedup {
    fn from(value: CliLabelDedup) -> Self {
        match value {
            CliLabelDedup::Preserve => LabelDedup::Preserve,
            CliLabelDedup::Deduplicate => LabelDedup::Deduplicate,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "aw-issues",
    about = "File agent-reported workflow events as deduplicated GitHub issues",
    version
)]
pub struct Cli {
    #[arg(
        long,
        env = "AW_ISSUES_MESSAGES",
        help = "Path to the event messages: a JSON array, a single JSON object, or JSON lines"
    )]
    pub messages: PathBuf,

    #[arg(
        long,
        value_enum,
        env = "AW_ISSUES_KIND",
        default_value = "missing-tool",
        help = "Event kind the messages belong to"
    )]
    pub kind: CliEventKind,

    #[arg(
        long = "github-repo",
        env = "GITHUB_REPOSITORY",
        help = "GitHub repository in owner/repo format that issues are filed in"
    )]
    pub github_repo: String,

    #[arg(
        long = "github-token",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "GitHub token used for API access"
    )]
    pub github_token: String,

    #[arg(
        long = "github-api-base",
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com",
        help = "GitHub API base URL"
    )]
    pub github_api_base: String,

    #[arg(
        long = "template-dir",
        env = "AW_ISSUES_TEMPLATE_DIR",
        default_value = "templates",
        help = "Directory holding the built-in issue templates"
    )]
    pub template_dir: PathBuf,

    #[arg(
        long,
        env = "AW_ISSUES_TEMPLATE",
        help = "Issue template file; overrides the event kind's template in --template-dir"
    )]
    pub template: Option<PathBuf>,

    #[arg(
        long,
        env = "AW_ISSUES_CONFIG",
        help = "JSON file with runtime config keys title_prefix, labels, max, label_dedup"
    )]
    pub config: Option<PathBuf>,

    #[arg(long = "title-prefix", help = "Issue title prefix override")]
    pub title_prefix: Option<String>,

    #[arg(long, help = "Comma-separated labels applied to new issues")]
    pub labels: Option<String>,

    #[arg(
        long,
        value_parser = parse_positive_count,
        help = "Maximum number of messages processed in this execution (default 1)"
    )]
    pub max: Option<u32>,

    #[arg(
        long = "label-dedup",
        value_enum,
        help = "Whether repeated labels are kept or dropped"
    )]
    pub label_dedup: Option<CliLabelDedup>,

    #[arg(
        long = "request-timeout-ms",
        env = "AW_ISSUES_REQUEST_TIMEOUT_MS",
        default_value_t = 30_000,
        help = "Timeout in milliseconds for each GitHub API request"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "fail-on-error",
        default_value_t = false,
        help = "Exit with an error when any message fails"
    )]
    pub fail_on_error: bool,
}

impl Cli {
    /// Runtime config carried by flags; merged over the `--config` file.
    pub fn runtime_config_overrides(&self) -> RuntimeConfig {
        RuntimeConfig {
            title_prefix: self.title_prefix.clone(),
            labels: self.labels.as_deref().map(LabelSpec::from),
            max: self.max,
            label_dedup: self.label_dedup.map(Into::into),
        }
    }
}
