use serde::de::DeserializeOwned;
use serde_json::Value;

/// Event-kind specific rendering of reported items.
///
/// The bridge never looks inside items; it deserializes each entry of the
/// configured items field into [`ItemRenderer::Item`] and asks the renderer
/// for ordered lines.
pub trait ItemRenderer: Send + Sync {
    type Item: DeserializeOwned + Send + Sync;

    /// Lines opening a comment posted on an existing issue.
    fn comment_header(&self, run_url: &str) -> Vec<String>;

    fn render_comment_item(&self, item: &Self::Item, index: usize) -> Vec<String>;

    fn render_issue_item(&self, item: &Self::Item, index: usize) -> Vec<String>;
}

/// Renderer for untyped items that prints each item as a JSON bullet.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonItemRenderer;

impl ItemRenderer for JsonItemRenderer {
    type Item = Value;

    fn comment_header(&self, run_url: &str) -> Vec<String> {
        vec![
            "## Additional items reported".to_string(),
            String::new(),
            format!("Reported in [this run]({run_url}):"),
            String::new(),
        ]
    }

    fn render_comment_item(&self, item: &Value, index: usize) -> Vec<String> {
        vec![format!("{}. `{item}`", index + 1)]
    }

    fn render_issue_item(&self, item: &Value, index: usize) -> Vec<String> {
        vec![format!("{}. `{item}`", index + 1)]
    }
}

/// Decode raw JSON items into the renderer's item type, keeping order.
///
/// The error names the first offending index.
pub fn decode_items<R: ItemRenderer>(
    items_field: &str,
    raw_items: &[Value],
) -> Result<Vec<R::Item>, String> {
    raw_items
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            serde_json::from_value::<R::Item>(raw.clone())
                .map_err(|error| format!("Invalid {items_field} entry at index {index}: {error}"))
        })
        .collect()
}
