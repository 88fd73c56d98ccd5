use serde::{Deserialize, Serialize};

/// One selected column source: a tier within a source document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SelectionEntry {
    /// Id of the source document the tier belongs to.
    pub source_id: String,

    /// Tier name within that document.
    pub tier: String,
}

impl SelectionEntry {
    /// Create an entry.
    #[must_use]
    pub fn new(source_id: impl Into<String>, tier: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            tier: tier.into(),
        }
    }
}

/// The ordered set of tiers a user is comparing.
///
/// Order is selection order and becomes column order. Uniqueness holds by
/// construction: toggling an already-selected pair removes it instead of
/// duplicating it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the pair if absent, remove it if present. Returns whether the
    /// pair is selected afterwards.
    pub fn toggle(&mut self, source_id: impl Into<String>, tier: impl Into<String>) -> bool {
        let entry = SelectionEntry::new(source_id, tier);
        if let Some(pos) = self.entries.iter().position(|e| *e == entry) {
            self.entries.remove(pos);
            false
        } else {
            self.entries.push(entry);
            true
        }
    }

    /// Whether the pair is currently selected.
    #[must_use]
    pub fn is_selected(&self, source_id: &str, tier: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.source_id == source_id && e.tier == tier)
    }

    /// Entries in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    /// Number of selected pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
