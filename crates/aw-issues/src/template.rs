use std::collections::BTreeMap;

/// Placeholder values keyed by name, substituted for `{{name}}` tokens.
pub type TemplateContext = BTreeMap<String, String>;

/// Substitute `{{key}}` placeholders with values from `context`.
///
/// Whitespace inside the braces is ignored. Placeholders without a matching
/// key, and an unterminated `{{`, are copied through literally. Substituted
/// values are never rescanned.
pub fn render_template(template: &str, context: &TemplateContext) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut cursor = 0usize;

    while let Some(open_offset) = template[cursor..].find("{{") {
        let open_index = cursor + open_offset;
        rendered.push_str(&template[cursor..open_index]);
        let Some(close_offset) = template[open_index + 2..].find("}}") else {
            cursor = open_index;
            break;
        };
        let close_index = open_index + 2 + close_offset;
        let placeholder = template[open_index + 2..close_index].trim();
        match context.get(placeholder) {
            Some(value) => rendered.push_str(value),
            None => rendered.push_str(&template[open_index..close_index + 2]),
        }
        cursor = close_index + 2;
    }

    rendered.push_str(&template[cursor..]);
    rendered
}
