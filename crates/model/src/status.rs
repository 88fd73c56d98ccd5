use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Availability of a feature within a single licensing tier.
///
/// Source documents describe availability in free-form vendor vocabulary
/// ("Yes", "Limited", "Add-on", ...). That vocabulary is collapsed onto this
/// closed set at the deserialization boundary, so the merge engine compares
/// variants rather than raw strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TierStatus {
    /// Fully granted by the tier.
    Included,
    /// Granted with restrictions.
    Partial,
    /// Not granted. Also the fallback for unknown vocabulary and for tiers
    /// a source says nothing about.
    #[default]
    Excluded,
    /// Purchasable separately, not granted by the tier itself.
    AddOn,
}

/// Known source vocabulary, lowercased. Labels not listed here map to
/// `Excluded`.
const VOCABULARY: &[(&str, TierStatus)] = &[
    ("included", TierStatus::Included),
    ("include", TierStatus::Included),
    ("yes", TierStatus::Included),
    ("full", TierStatus::Included),
    ("available", TierStatus::Included),
    ("partial", TierStatus::Partial),
    ("limited", TierStatus::Partial),
    ("add-on", TierStatus::AddOn),
    ("add on", TierStatus::AddOn),
    ("addon", TierStatus::AddOn),
    ("excluded", TierStatus::Excluded),
    ("no", TierStatus::Excluded),
    ("none", TierStatus::Excluded),
    ("not included", TierStatus::Excluded),
];

impl TierStatus {
    /// Map a raw source label onto the closed status set.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let needle = label.trim().to_lowercase();
        VOCABULARY
            .iter()
            .find(|(word, _)| *word == needle)
            .map_or(Self::Excluded, |(_, status)| *status)
    }

    /// Canonical label, used wherever the status is rendered or serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Included => "included",
            Self::Partial => "partial",
            Self::Excluded => "excluded",
            Self::AddOn => "add-on",
        }
    }

    /// Whether the presence detail level renders this status as granted.
    /// An add-on is purchasable rather than granted, so it does not count.
    #[must_use]
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Included | Self::Partial)
    }
}

impl fmt::Display for TierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TierStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TierStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_vocabulary_mapping() {
        assert_eq!(TierStatus::from_label("included"), TierStatus::Included);
        assert_eq!(TierStatus::from_label("yes"), TierStatus::Included);
        assert_eq!(TierStatus::from_label("full"), TierStatus::Included);
        assert_eq!(TierStatus::from_label("partial"), TierStatus::Partial);
        assert_eq!(TierStatus::from_label("limited"), TierStatus::Partial);
        assert_eq!(TierStatus::from_label("add-on"), TierStatus::AddOn);
        assert_eq!(TierStatus::from_label("addon"), TierStatus::AddOn);
        assert_eq!(TierStatus::from_label("no"), TierStatus::Excluded);
    }

    #[test]
    fn test_mapping_trims_and_ignores_case() {
        assert_eq!(TierStatus::from_label("  Included "), TierStatus::Included);
        assert_eq!(TierStatus::from_label("LIMITED"), TierStatus::Partial);
        assert_eq!(TierStatus::from_label("Add-On"), TierStatus::AddOn);
    }

    #[test]
    fn test_unknown_labels_fall_back_to_excluded() {
        assert_eq!(TierStatus::from_label("bundled"), TierStatus::Excluded);
        assert_eq!(TierStatus::from_label(""), TierStatus::Excluded);
        assert_eq!(TierStatus::from_label("✓"), TierStatus::Excluded);
    }

    #[test]
    fn test_presence() {
        assert!(TierStatus::Included.is_present());
        assert!(TierStatus::Partial.is_present());
        assert!(!TierStatus::Excluded.is_present());
        assert!(!TierStatus::AddOn.is_present());
    }

    #[test]
    fn test_serde_uses_canonical_labels() {
        let json = serde_json::to_string(&TierStatus::AddOn).unwrap();
        assert_eq!(json, "\"add-on\"");

        let status: TierStatus = serde_json::from_str("\"Limited\"").unwrap();
        assert_eq!(status, TierStatus::Partial);

        let status: TierStatus = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(status, TierStatus::Excluded);
    }
}
