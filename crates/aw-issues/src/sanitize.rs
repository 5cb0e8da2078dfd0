use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Upper bound on posted body size; GitHub rejects bodies above 65,536 characters.
pub const SANITIZED_CONTENT_MAX_CHARS: usize = 65_000;
const TRUNCATION_NOTICE: &str = "\n\n[Content truncated due to length]";

/// Neutralizes untrusted text before it is posted to the tracker.
pub trait ContentSanitizer: Send + Sync {
    fn sanitize(&self, text: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Default sanitizer for agent-authored markdown.
pub struct MarkdownSanitizer {
    max_chars: usize,
}

impl Default for MarkdownSanitizer {
    fn default() -> Self {
        Self {
            max_chars: SANITIZED_CONTENT_MAX_CHARS,
        }
    }
}

impl MarkdownSanitizer {
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl ContentSanitizer for MarkdownSanitizer {
    fn sanitize(&self, text: &str) -> String {
        let cleaned = strip_control_characters(text);
        let cleaned = neutralize_mentions(&cleaned);
        let cleaned = neutralize_bot_triggers(&cleaned);
        let cleaned = neutralize_markup_tags(&cleaned);
        truncate_content(&cleaned, self.max_chars)
    }
}

fn strip_control_characters(text: &str) -> String {
    text.chars()
        .filter(|ch| !ch.is_control() || matches!(ch, '\n' | '\t'))
        .collect()
}

fn mention_regex() -> Option<&'static Regex> {
    static MENTION: OnceLock<Option<Regex>> = OnceLock::new();
    MENTION
        .get_or_init(|| {
            Regex::new(r"(^|[^\w`])@([A-Za-z0-9][A-Za-z0-9-]{0,38}(?:/[A-Za-z0-9._-]+)?)").ok()
        })
        .as_ref()
}

fn bot_trigger_regex() -> Option<&'static Regex> {
    static BOT_TRIGGER: OnceLock<Option<Regex>> = OnceLock::new();
    BOT_TRIGGER
        .get_or_init(|| {
            Regex::new(
                r"(?i)(^|[^\w`])((?:fix|fixes|fixed|close|closes|closed|resolve|resolves|resolved)\s+#\d+)",
            )
            .ok()
        })
        .as_ref()
}

fn markup_tag_regex() -> Option<&'static Regex> {
    static MARKUP_TAG: OnceLock<Option<Regex>> = OnceLock::new();
    MARKUP_TAG
        .get_or_init(|| Regex::new(r"</?[A-Za-z][A-Za-z0-9-]*[^<>\n]*>").ok())
        .as_ref()
}

fn neutralize_mentions(text: &str) -> String {
    match mention_regex() {
        Some(regex) => regex.replace_all(text, "$1`@$2`").into_owned(),
        None => text.to_string(),
    }
}

fn neutralize_bot_triggers(text: &str) -> String {
    match bot_trigger_regex() {
        Some(regex) => regex.replace_all(text, "$1`$2`").into_owned(),
        None => text.to_string(),
    }
}

// HTML comments start with `<!` and never match, so expiration markers survive.
// Tags end on their own line; a stray `<` must not reach a later blockquote `>`.
fn neutralize_markup_tags(text: &str) -> String {
    match markup_tag_regex() {
        Some(regex) => regex
            .replace_all(text, |caps: &Captures<'_>| {
                let tag = &caps[0];
                format!("({})", &tag[1..tag.len() - 1])
            })
            .into_owned(),
        None => text.to_string(),
    }
}

fn truncate_content(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str(TRUNCATION_NOTICE);
    truncated
}
