use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
/// Label configuration as supplied by workflow authors.
pub enum LabelSpec {
    /// Comma-delimited list, e.g. `"bug, help wanted"`.
    Delimited(String),
    List(Vec<String>),
}

impl From<&str> for LabelSpec {
    fn from(raw: &str) -> Self {
        Self::Delimited(raw.to_string())
    }
}

impl From<Vec<String>> for LabelSpec {
    fn from(labels: Vec<String>) -> Self {
        Self::List(labels)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Whether repeated labels survive normalization.
pub enum LabelDedup {
    #[default]
    Preserve,
    Deduplicate,
}

impl LabelDedup {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preserve => "preserve",
            Self::Deduplicate => "deduplicate",
        }
    }
}

impl FromStr for LabelDedup {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "deduplicate" | "dedup" => Ok(Self::Deduplicate),
            other => Err(format!(
                "unsupported label dedup mode '{other}', expected preserve or deduplicate"
            )),
        }
    }
}

/// Normalize a label spec into trimmed, non-empty labels in their original order.
///
/// Duplicates are kept; use [`normalize_labels_with`] to filter them.
pub fn normalize_labels(spec: Option<&LabelSpec>) -> Vec<String> {
    normalize_labels_with(spec, LabelDedup::Preserve)
}

pub fn normalize_labels_with(spec: Option<&LabelSpec>, dedup: LabelDedup) -> Vec<String> {
    let Some(spec) = spec else {
        return Vec::new();
    };
    let raw: Vec<&str> = match spec {
        LabelSpec::Delimited(value) => value.split(',').collect(),
        LabelSpec::List(values) => values.iter().map(String::as_str).collect(),
    };
    let labels = raw
        .into_iter()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(ToOwned::to_owned);
    match dedup {
        LabelDedup::Preserve => labels.collect(),
        LabelDedup::Deduplicate => {
            let mut seen = HashSet::new();
            labels.filter(|label| seen.insert(label.clone())).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_labels, normalize_labels_with, LabelDedup, LabelSpec};

    #[test]
    fn unit_normalize_labels_returns_empty_for_absent_spec() {
        assert!(normalize_labels(None).is_empty());
    }

    #[test]
    fn functional_delimited_and_list_specs_normalize_identically() {
        let delimited = normalize_labels(Some(&LabelSpec::from("bug, help wanted")));
        let list = normalize_labels(Some(&LabelSpec::from(vec![
            "bug".to_string(),
            "help wanted".to_string(),
        ])));
        assert_eq!(delimited, vec!["bug", "help wanted"]);
        assert_eq!(delimited, list);
    }

    #[test]
    fn regression_blank_entries_are_dropped_and_duplicates_preserved() {
        let labels = normalize_labels(Some(&LabelSpec::from(" bug ,, ,bug,automation ")));
        assert_eq!(labels, vec!["bug", "bug", "automation"]);
    }

    #[test]
    fn functional_deduplicate_mode_keeps_first_occurrence_order() {
        let spec = LabelSpec::List(vec![
            " automation".to_string(),
            "bug".to_string(),
            "automation ".to_string(),
            "".to_string(),
        ]);
        let labels = normalize_labels_with(Some(&spec), LabelDedup::Deduplicate);
        assert_eq!(labels, vec!["automation", "bug"]);
    }

    #[test]
    fn unit_label_spec_deserializes_string_or_array() {
        let from_string: LabelSpec = serde_json::from_str("\"a,b\"").expect("string spec");
        let from_array: LabelSpec = serde_json::from_str("[\"a\",\"b\"]").expect("array spec");
        assert_eq!(from_string, LabelSpec::Delimited("a,b".to_string()));
        assert_eq!(
            from_array,
            LabelSpec::List(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn unit_label_dedup_parses_known_modes() {
        assert_eq!("Deduplicate".parse::<LabelDedup>(), Ok(LabelDedup::Deduplicate));
        assert_eq!("preserve".parse::<LabelDedup>(), Ok(LabelDedup::Preserve));
        assert!("sometimes".parse::<LabelDedup>().is_err());
    }
}
