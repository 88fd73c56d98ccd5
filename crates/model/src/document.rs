use serde::{Deserialize, Serialize};

use crate::SourceTaxonomy;

/// A stored source document: extraction output plus the identity the rest of
/// the system refers to it by.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceDocument {
    /// Stable identifier used by selections and the catalog.
    pub id: String,

    /// Human-readable title; feeds column labels.
    pub title: String,

    /// The extracted taxonomy.
    pub taxonomy: SourceTaxonomy,
}

impl SourceDocument {
    /// Create a document.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        taxonomy: SourceTaxonomy,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            taxonomy,
        }
    }

    /// Check the stored-document contract before a catalog accepts it.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("document id must not be empty".to_string());
        }

        if self.title.trim().is_empty() {
            return Err(format!("document '{}' has an empty title", self.id));
        }

        if self.taxonomy.tiers.is_empty() {
            return Err(format!("document '{}' declares no tiers", self.id));
        }

        Ok(())
    }
}
