use chrono::{DateTime, Duration, SecondsFormat, Utc};

pub const EXPIRES_MARKER_PREFIX: &str = "<!-- aw-expires: ";
pub const EXPIRES_MARKER_SUFFIX: &str = " -->";
/// Lifetime of issues opened by the bridge before the cleanup job may close them.
pub const DEFAULT_ISSUE_EXPIRES_HOURS: u32 = 24 * 7;

/// Build the quoted footer block appended to new issue bodies.
///
/// The block carries `footer_text` followed by a machine-readable expiration
/// marker (`<!-- aw-expires: <rfc3339> -->`) for `now + expires_hours`.
pub fn build_footer(footer_text: &str, expires_hours: u32, now: DateTime<Utc>) -> String {
    let expires_at = now
        .checked_add_signed(Duration::hours(i64::from(expires_hours)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let quoted_text = footer_text
        .lines()
        .map(|line| format!("> {line}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "\n\n{quoted_text}\n>\n> - [x] expires {} on {}\n",
        render_expiration_marker(expires_at),
        expires_at.format("%b %-d, %Y, %-I:%M %p UTC")
    )
}

pub fn build_footer_now(footer_text: &str, expires_hours: u32) -> String {
    build_footer(footer_text, expires_hours, Utc::now())
}

pub fn render_expiration_marker(expires_at: DateTime<Utc>) -> String {
    format!(
        "{EXPIRES_MARKER_PREFIX}{}{EXPIRES_MARKER_SUFFIX}",
        expires_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Extract the first expiration marker embedded in `body`.
pub fn parse_expiration_marker(body: &str) -> Option<DateTime<Utc>> {
    let start = body.find(EXPIRES_MARKER_PREFIX)? + EXPIRES_MARKER_PREFIX.len();
    let remainder = &body[start..];
    let end = remainder.find(EXPIRES_MARKER_SUFFIX)?;
    DateTime::parse_from_rfc3339(remainder[..end].trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Returns true when `body` carries an expiration marker at or before `now`.
pub fn is_expired(body: &str, now: DateTime<Utc>) -> bool {
    parse_expiration_marker(body)
        .map(|expires_at| expires_at <= now)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{
        build_footer, is_expired, parse_expiration_marker, DEFAULT_ISSUE_EXPIRES_HOURS,
        EXPIRES_MARKER_PREFIX,
    };
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn unit_build_footer_quotes_text_and_embeds_marker() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let footer = build_footer("AI generated by [Nightly](https://example.test/wf)", 24, now);
        assert!(footer.starts_with("\n\n> AI generated by [Nightly](https://example.test/wf)\n>\n"));
        assert!(footer.contains("<!-- aw-expires: 2026-01-02T00:00:00.000Z -->"));
        assert!(footer.contains("on Jan 2, 2026, 12:00 AM UTC"));
    }

    #[test]
    fn functional_default_expiration_is_seven_days_out_and_reparseable() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let footer = build_footer("footer", DEFAULT_ISSUE_EXPIRES_HOURS, now);
        let expires_at = parse_expiration_marker(&footer).expect("marker");
        assert_eq!(expires_at, now + Duration::days(7));
    }

    #[test]
    fn integration_is_expired_compares_marker_against_clock() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let body = format!("issue body{}", build_footer("footer", 1, now));
        assert!(!is_expired(&body, now));
        assert!(is_expired(&body, now + Duration::hours(1)));
        assert!(!is_expired("no marker here", now));
    }

    #[test]
    fn regression_malformed_marker_is_ignored() {
        let body = format!("{EXPIRES_MARKER_PREFIX}not-a-date -->");
        assert_eq!(parse_expiration_marker(&body), None);
        assert_eq!(parse_expiration_marker(EXPIRES_MARKER_PREFIX), None);
    }

    #[test]
    fn unit_multiline_footer_text_is_quoted_line_by_line() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let footer = build_footer("line one\n\nline two", 1, now);
        assert!(footer.contains("> line one\n>\n> line two\n"));
    }
}
