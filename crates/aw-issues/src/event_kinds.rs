//! Built-in event kinds reported by agents: missing tools and missing data.

use serde::{Deserialize, Serialize};

use crate::item_renderer::ItemRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Enumerates supported `EventKind` values.
pub enum EventKind {
    MissingTool,
    MissingData,
}

impl EventKind {
    pub fn handler_type(self) -> &'static str {
        match self {
            Self::MissingTool => "missing_tool",
            Self::MissingData => "missing_data",
        }
    }

    pub fn default_title_prefix(self) -> &'static str {
        match self {
            Self::MissingTool => "[missing tool]",
            Self::MissingData => "[missing data]",
        }
    }

    pub fn items_field(self) -> &'static str {
        match self {
            Self::MissingTool => "missing_tools",
            Self::MissingData => "missing_data",
        }
    }

    pub fn items_placeholder(self) -> &'static str {
        match self {
            Self::MissingTool => "missing_tools_list",
            Self::MissingData => "missing_data_list",
        }
    }

    /// File name of the issue template shipped under `templates/`.
    pub fn template_file_name(self) -> &'static str {
        match self {
            Self::MissingTool => "missing_tool_issue.md",
            Self::MissingData => "missing_data_issue.md",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingToolItem {
    pub tool: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub alternatives: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDataItem {
    pub data_type: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub alternatives: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

fn push_optional_line(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        lines.push(format!("**{label}:** {value}"));
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MissingToolRenderer;

impl MissingToolRenderer {
    fn render_item(heading: &str, item: &MissingToolItem, index: usize) -> Vec<String> {
        let mut lines = vec![format!("{heading} {}. `{}`", index + 1, item.tool)];
        push_optional_line(&mut lines, "Reason", Some(item.reason.as_str()));
        push_optional_line(&mut lines, "Alternatives", item.alternatives.as_deref());
        push_optional_line(&mut lines, "Reported at", item.timestamp.as_deref());
        lines.push(String::new());
        lines
    }
}

impl ItemRenderer for MissingToolRenderer {
    type Item = MissingToolItem;

    fn comment_header(&self, run_url: &str) -> Vec<String> {
        vec![
            "## Missing Tools Reported".to_string(),
            String::new(),
            format!("The following tools were reported as missing in [this run]({run_url}):"),
            String::new(),
        ]
    }

    fn render_comment_item(&self, item: &MissingToolItem, index: usize) -> Vec<String> {
        Self::render_item("###", item, index)
    }

    fn render_issue_item(&self, item: &MissingToolItem, index: usize) -> Vec<String> {
        Self::render_item("####", item, index)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MissingDataRenderer;

impl MissingDataRenderer {
    fn render_item(heading: &str, item: &MissingDataItem, index: usize) -> Vec<String> {
        let mut lines = vec![format!("{heading} {}. `{}`", index + 1, item.data_type)];
        push_optional_line(&mut lines, "Reason", Some(item.reason.as_str()));
        push_optional_line(&mut lines, "Context", item.context.as_deref());
        push_optional_line(&mut lines, "Alternatives", item.alternatives.as_deref());
        push_optional_line(&mut lines, "Reported at", item.timestamp.as_deref());
        lines.push(String::new());
        lines
    }
}

impl ItemRenderer for MissingDataRenderer {
    type Item = MissingDataItem;

    fn comment_header(&self, run_url: &str) -> Vec<String> {
        vec![
            "## Missing Data Reported".to_string(),
            String::new(),
            format!("The following data was reported as unavailable in [this run]({run_url}):"),
            String::new(),
        ]
    }

    fn render_comment_item(&self, item: &MissingDataItem, index: usize) -> Vec<String> {
        Self::render_item("###", item, index)
    }

    fn render_issue_item(&self, item: &MissingDataItem, index: usize) -> Vec<String> {
        Self::render_item("####", item, index)
    }
}
