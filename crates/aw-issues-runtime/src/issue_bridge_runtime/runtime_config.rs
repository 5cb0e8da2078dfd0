use aw_issues::labels::{normalize_labels_with, LabelDedup, LabelSpec};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_COUNT: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Per-execution tunables supplied by the workflow configuration.
pub struct RuntimeConfig {
    pub title_prefix: Option<String>,
    pub labels: Option<LabelSpec>,
    /// Maximum messages reconciled per execution; absent or zero means one.
    pub max: Option<u32>,
    /// Absent means [`LabelDedup::Preserve`].
    pub label_dedup: Option<LabelDedup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Concrete settings a message handler runs with.
pub struct ResolvedRuntimeConfig {
    pub title_prefix: String,
    pub labels: Vec<String>,
    pub max_count: u32,
}

impl RuntimeConfig {
    pub fn resolve(&self, default_title_prefix: &str) -> ResolvedRuntimeConfig {
        let title_prefix = self
            .title_prefix
            .as_deref()
            .filter(|prefix| !prefix.trim().is_empty())
            .unwrap_or(default_title_prefix)
            .to_string();
        let max_count = match self.max {
            Some(max) if max > 0 => max,
            _ => DEFAULT_MAX_COUNT,
        };
        let dedup = self.label_dedup.unwrap_or_default();
        ResolvedRuntimeConfig {
            title_prefix,
            labels: normalize_labels_with(self.labels.as_ref(), dedup),
            max_count,
        }
    }

    /// Layer `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merged_with(self, overrides: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            title_prefix: overrides.title_prefix.or(self.title_prefix),
            labels: overrides.labels.or(self.labels),
            max: overrides.max.or(self.max),
            label_dedup: overrides.label_dedup.or(self.label_dedup),
        }
    }
}
