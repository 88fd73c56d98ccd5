use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Serialize, Serializer};
use tierlens_model::{Feature, TierStatus};

/// Stable identity of one comparison column: a tier within a source.
///
/// Display labels can collide (two documents may share a title and a tier
/// name), so every per-column lookup hangs off this key, never off the
/// label. Serialized as `"source_id:tier"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    /// Id of the source document.
    pub source_id: String,

    /// Tier name within that document.
    pub tier: String,
}

impl ColumnKey {
    /// Create a key.
    #[must_use]
    pub fn new(source_id: impl Into<String>, tier: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            tier: tier.into(),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_id, self.tier)
    }
}

impl Serialize for ColumnKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// One column of the comparison.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Column {
    /// Identity used for lookups.
    pub key: ColumnKey,

    /// Rendering label: `"{document title} - {tier}"`.
    pub label: String,
}

impl Column {
    /// Derive the column for a tier of a titled document.
    #[must_use]
    pub fn new(key: ColumnKey, source_title: &str) -> Self {
        let label = format!("{} - {}", source_title, key.tier);
        Self { key, label }
    }
}

/// A feature after merging: one row of the comparison.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UnifiedFeature {
    /// Display name of the first occurrence.
    pub name: String,

    /// Longest description seen across occurrences.
    pub description: String,

    /// First non-empty link seen across occurrences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Availability per column. Exactly one entry per comparison column.
    pub status: HashMap<ColumnKey, TierStatus>,

    /// Columns whose source actually declared this feature, in column
    /// order. Distinguishes a recorded "excluded" from a defaulted one.
    pub origins: Vec<ColumnKey>,

    /// Whether the columns disagree about this feature.
    pub is_diff: bool,
}

impl UnifiedFeature {
    /// Start a row for a newly seen feature: the first occurrence names it,
    /// and every column starts at `Excluded` until its source speaks up.
    pub(crate) fn seeded(feature: &Feature, columns: &[ColumnKey]) -> Self {
        let status = columns
            .iter()
            .map(|key| (key.clone(), TierStatus::Excluded))
            .collect();

        Self {
            name: feature.name.clone(),
            description: String::new(),
            link: None,
            status,
            origins: Vec::new(),
            is_diff: false,
        }
    }

    /// Fold one source occurrence into the row.
    pub(crate) fn absorb(&mut self, feature: &Feature, column: &ColumnKey) {
        // Adopt a link when the row has none yet; later links never replace
        // an earlier one.
        if self.link.is_none() {
            if let Some(link) = feature.link.as_deref() {
                if !link.is_empty() {
                    self.link = Some(link.to_string());
                }
            }
        }

        // A strictly longer description is taken as the richer one; ties
        // keep the incumbent.
        if feature.description.chars().count() > self.description.chars().count() {
            self.description = feature.description.clone();
        }

        self.status
            .insert(column.clone(), feature.status_for(&column.tier));

        if !self.origins.contains(column) {
            self.origins.push(column.clone());
        }
    }

    /// Recompute the disagreement flag from the status map.
    pub(crate) fn recompute_diff(&mut self) {
        let distinct: HashSet<TierStatus> = self.status.values().copied().collect();
        self.is_diff = distinct.len() > 1;
    }

    /// Availability in one column.
    #[must_use]
    pub fn status_for(&self, key: &ColumnKey) -> TierStatus {
        self.status.get(key).copied().unwrap_or_default()
    }
}

/// An ordered group of merged features.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UnifiedCategory {
    /// Display name of the first occurrence.
    pub name: String,

    /// Features in first-seen order.
    pub features: Vec<UnifiedFeature>,
}

/// The merged comparison. Derived data: recomputed on demand, never stored.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UnifiedTaxonomy {
    /// Comparison columns in selection order.
    pub columns: Vec<Column>,

    /// Categories in first-seen order.
    pub categories: Vec<UnifiedCategory>,
}

impl UnifiedTaxonomy {
    /// Category display names in order; feeds the category filter.
    #[must_use]
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Total number of merged features.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.categories.iter().map(|c| c.features.len()).sum()
    }

    /// Whether the comparison has nothing to display.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
