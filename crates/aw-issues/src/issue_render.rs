use crate::item_renderer::ItemRenderer;
use crate::template::TemplateContext;

pub const COMMENT_SEPARATOR_LINE: &str = "---";
pub const WORKFLOW_NAME_PLACEHOLDER: &str = "workflow_name";
pub const WORKFLOW_SOURCE_PLACEHOLDER: &str = "workflow_source";
pub const WORKFLOW_SOURCE_URL_PLACEHOLDER: &str = "workflow_source_url";
pub const RUN_URL_PLACEHOLDER: &str = "run_url";

#[derive(Debug, Clone, Copy)]
/// Workflow metadata shared by comment and issue rendering.
pub struct WorkflowRunView<'a> {
    pub workflow_name: &'a str,
    pub workflow_source: &'a str,
    pub workflow_source_url: &'a str,
    pub run_url: &'a str,
}

impl WorkflowRunView<'_> {
    /// Source URL with `#` standing in for a missing link.
    pub fn source_url_or_anchor(&self) -> &str {
        if self.workflow_source_url.trim().is_empty() {
            "#"
        } else {
            self.workflow_source_url
        }
    }

    fn source_label(&self) -> &str {
        if self.workflow_source.trim().is_empty() {
            self.workflow_name
        } else {
            self.workflow_source
        }
    }
}

/// Title shared by every issue opened for one workflow and event kind.
pub fn issue_title(title_prefix: &str, workflow_name: &str) -> String {
    format!("{title_prefix} {workflow_name}")
}

/// Render the comment appended to an already-open issue.
pub fn render_comment_body<R: ItemRenderer>(
    renderer: &R,
    run: WorkflowRunView<'_>,
    items: &[R::Item],
) -> String {
    let mut lines = renderer.comment_header(run.run_url);
    for (index, item) in items.iter().enumerate() {
        lines.extend(renderer.render_comment_item(item, index));
    }
    // A separator directly under paragraph text would turn it into a heading.
    if lines.last().is_some_and(|line| !line.trim().is_empty()) {
        lines.push(String::new());
    }
    lines.push(COMMENT_SEPARATOR_LINE.to_string());
    lines.push(format!(
        "> Workflow: [{}]({})",
        run.source_label(),
        run.source_url_or_anchor()
    ));
    lines.push(format!("> Run: {}", run.run_url));
    lines.join("\n")
}

/// Render the item list substituted into a new issue's template.
pub fn render_issue_items_block<R: ItemRenderer>(renderer: &R, items: &[R::Item]) -> String {
    items
        .iter()
        .enumerate()
        .flat_map(|(index, item)| renderer.render_issue_item(item, index))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_issue_template_context(
    run: WorkflowRunView<'_>,
    items_placeholder: &str,
    items_block: String,
) -> TemplateContext {
    TemplateContext::from([
        (
            WORKFLOW_NAME_PLACEHOLDER.to_string(),
            run.workflow_name.to_string(),
        ),
        (
            WORKFLOW_SOURCE_URL_PLACEHOLDER.to_string(),
            run.source_url_or_anchor().to_string(),
        ),
        (RUN_URL_PLACEHOLDER.to_string(), run.run_url.to_string()),
        (
            WORKFLOW_SOURCE_PLACEHOLDER.to_string(),
            run.workflow_source.to_string(),
        ),
        (items_placeholder.to_string(), items_block),
    ])
}

/// Attribution line quoted in the footer of new issues.
pub fn render_issue_footer_text(run: WorkflowRunView<'_>) -> String {
    format!(
        "AI generated by [{}]({})",
        run.workflow_name,
        run.source_url_or_anchor()
    )
}
