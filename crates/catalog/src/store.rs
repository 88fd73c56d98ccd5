use std::collections::HashMap;

use tierlens_model::SourceDocument;

use crate::error::{CatalogError, Result};

/// Read-only resolution of source documents by id.
///
/// The merge engine is handed this seam instead of a concrete store, so any
/// backing (in-memory, database, remote service) can serve a comparison.
pub trait SourceCatalog {
    /// Resolve a document by id. `None` means the document is not available;
    /// callers treat that as "skip this source", not as an error.
    fn resolve(&self, source_id: &str) -> Option<&SourceDocument>;
}

/// Insertion-ordered in-memory catalog.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    documents: Vec<SourceDocument>,
    id_to_idx: HashMap<String, usize>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, replacing any existing one with the same id.
    pub fn insert(&mut self, document: SourceDocument) -> Result<()> {
        document.validate().map_err(CatalogError::Invalid)?;

        match self.id_to_idx.get(&document.id) {
            Some(&idx) => {
                log::debug!("Replacing document '{}'", document.id);
                self.documents[idx] = document;
            }
            None => {
                log::debug!("Storing document '{}'", document.id);
                self.id_to_idx
                    .insert(document.id.clone(), self.documents.len());
                self.documents.push(document);
            }
        }

        Ok(())
    }

    /// Remove a document, returning it if it was present.
    pub fn remove(&mut self, source_id: &str) -> Option<SourceDocument> {
        let idx = self.id_to_idx.remove(source_id)?;
        let document = self.documents.remove(idx);

        // Documents after the removed one shifted left by one.
        for (pos, doc) in self.documents.iter().enumerate().skip(idx) {
            self.id_to_idx.insert(doc.id.clone(), pos);
        }

        Some(document)
    }

    /// Stored documents in insertion order.
    #[must_use]
    pub fn documents(&self) -> &[SourceDocument] {
        &self.documents
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the catalog holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Point a stored feature at different vendor documentation, or clear
    /// the link. Edits the source document in place; merged views pick the
    /// change up on their next recompute.
    pub fn set_feature_link(
        &mut self,
        source_id: &str,
        category: &str,
        feature: &str,
        link: Option<String>,
    ) -> Result<()> {
        let idx = *self
            .id_to_idx
            .get(source_id)
            .ok_or_else(|| CatalogError::UnknownDocument(source_id.to_string()))?;

        let found = self.documents[idx]
            .taxonomy
            .categories
            .iter_mut()
            .filter(|c| c.name == category)
            .flat_map(|c| c.features.iter_mut())
            .find(|f| f.name == feature);

        match found {
            Some(f) => {
                f.link = link;
                Ok(())
            }
            None => Err(CatalogError::UnknownFeature {
                document: source_id.to_string(),
                category: category.to_string(),
                feature: feature.to_string(),
            }),
        }
    }
}

impl SourceCatalog for MemoryCatalog {
    fn resolve(&self, source_id: &str) -> Option<&SourceDocument> {
        self.id_to_idx
            .get(source_id)
            .map(|&idx| &self.documents[idx])
    }
}
