/// Truncate a response body or error string so it stays readable in logs and results.
pub fn truncate_for_error(raw: &str, max_chars: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut truncated = trimmed.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Build the GitHub search query used to locate an open issue by exact title.
pub fn build_open_issue_search_query(repo_slug: &str, issue_title: &str) -> String {
    let escaped = issue_title.replace('"', "\\\"");
    format!("repo:{repo_slug} is:issue is:open in:title \"{escaped}\"")
}
