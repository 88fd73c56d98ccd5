use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::TierStatus;

/// A single comparable capability as one source document describes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feature {
    /// Display name as extracted from the source.
    pub name: String,

    /// Free-text description of the capability.
    pub description: String,

    /// Optional reference back to vendor documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Availability per tier of the owning document. Tiers the source says
    /// nothing about are simply absent.
    pub status: HashMap<String, TierStatus>,
}

impl Feature {
    /// Create a feature with no link and no recorded statuses.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            link: None,
            status: HashMap::new(),
        }
    }

    /// Builder: set the documentation link.
    #[must_use]
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Builder: record availability for one tier.
    #[must_use]
    pub fn status(mut self, tier: impl Into<String>, status: TierStatus) -> Self {
        self.status.insert(tier.into(), status);
        self
    }

    /// Availability for one tier; tiers the source does not mention are
    /// `Excluded`.
    #[must_use]
    pub fn status_for(&self, tier: &str) -> TierStatus {
        self.status.get(tier).copied().unwrap_or_default()
    }
}

/// An ordered group of related features.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Display name as extracted from the source.
    pub name: String,

    /// Features in source order.
    pub features: Vec<Feature>,
}

impl Category {
    /// Create an empty category.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
        }
    }

    /// Builder: append a feature.
    #[must_use]
    pub fn feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }
}

/// The full tree one extraction pass produced for a document: tier names plus
/// categorized features. Immutable once stored; the merge engine only
/// reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceTaxonomy {
    /// Tier names in document order (e.g. ["E3", "E5"]).
    pub tiers: Vec<String>,

    /// Categories in document order.
    pub categories: Vec<Category>,
}

impl SourceTaxonomy {
    /// Create a taxonomy with the given tier names and no categories yet.
    #[must_use]
    pub fn new(tiers: Vec<String>) -> Self {
        Self {
            tiers,
            categories: Vec::new(),
        }
    }

    /// Builder: append a category.
    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Whether this taxonomy declares the given tier.
    #[must_use]
    pub fn has_tier(&self, tier: &str) -> bool {
        self.tiers.iter().any(|t| t == tier)
    }

    /// Total number of features across all categories.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.categories.iter().map(|c| c.features.len()).sum()
    }
}
