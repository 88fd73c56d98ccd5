use serde::{Deserialize, Serialize};

use crate::unified::{UnifiedCategory, UnifiedFeature, UnifiedTaxonomy};

/// What the view keeps. The default keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewFilter {
    /// Case-insensitive substring matched against feature names and
    /// descriptions. Empty matches every row.
    pub query: String,

    /// Category display names to keep. Empty keeps all categories.
    pub categories: Vec<String>,

    /// Keep only rows whose columns disagree.
    pub diff_only: bool,
}

impl ViewFilter {
    /// Create a filter that keeps everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the text query.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Builder: add a category to the allow-list.
    #[must_use]
    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    /// Builder: keep differing rows only.
    #[must_use]
    pub const fn diff_only(mut self, on: bool) -> Self {
        self.diff_only = on;
        self
    }

    fn keeps_category(&self, name: &str) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| c == name)
    }

    fn keeps_feature(&self, feature: &UnifiedFeature) -> bool {
        if self.diff_only && !feature.is_diff {
            return false;
        }
        contains_case_insensitive(&feature.name, &self.query)
            || contains_case_insensitive(&feature.description, &self.query)
    }
}

/// How much of each status cell the rendering shows.
///
/// A pure rendering switch: it never changes which rows the projection
/// keeps, only whether a cell renders as the exact status or as a granted /
/// not-granted boolean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Exact status per column.
    #[default]
    Full,
    /// Granted / not granted only.
    Presence,
}

/// Project the comparison through a filter.
///
/// Order is preserved from the unified taxonomy; categories left without
/// features are dropped. Recomputed from scratch on every call, and the
/// unified taxonomy is never touched, so filters can change freely between
/// calls.
#[must_use]
pub fn project(unified: &UnifiedTaxonomy, filter: &ViewFilter) -> Vec<UnifiedCategory> {
    let mut view = Vec::new();

    for category in &unified.categories {
        if !filter.keeps_category(&category.name) {
            continue;
        }

        let features: Vec<UnifiedFeature> = category
            .features
            .iter()
            .filter(|f| filter.keeps_feature(f))
            .cloned()
            .collect();

        if features.is_empty() {
            continue;
        }

        view.push(UnifiedCategory {
            name: category.name.clone(),
            features,
        });
    }

    log::debug!(
        "Projected {} of {} categories",
        view.len(),
        unified.categories.len()
    );
    view
}

fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
