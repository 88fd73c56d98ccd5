use std::fmt;

use serde::Serialize;
use tierlens_engine::{Column, DetailLevel, UnifiedCategory, UnifiedFeature};
use tierlens_model::SourceDocument;

/// A comparison view prepared for output: statuses resolved into cells in
/// column order, honoring the requested detail level.
#[derive(Debug, Serialize)]
pub struct ViewOutput {
    /// Column labels in selection order.
    pub columns: Vec<String>,

    pub categories: Vec<CategoryRows>,
}

#[derive(Debug, Serialize)]
pub struct CategoryRows {
    pub name: String,
    pub features: Vec<FeatureRow>,
}

#[derive(Debug, Serialize)]
pub struct FeatureRow {
    pub name: String,
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    pub is_diff: bool,

    /// One cell per column, aligned with `ViewOutput::columns`.
    pub cells: Vec<Cell>,
}

/// A status cell: the exact status in full detail, a granted/not-granted
/// boolean in presence detail.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Status(&'static str),
    Present(bool),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(label) => f.write_str(label),
            Self::Present(true) => f.write_str("yes"),
            Self::Present(false) => f.write_str("no"),
        }
    }
}

/// Flatten a projected view into output rows.
pub fn view_output(
    columns: &[Column],
    view: &[UnifiedCategory],
    detail: DetailLevel,
) -> ViewOutput {
    ViewOutput {
        columns: columns.iter().map(|c| c.label.clone()).collect(),
        categories: view
            .iter()
            .map(|category| CategoryRows {
                name: category.name.clone(),
                features: category
                    .features
                    .iter()
                    .map(|feature| feature_row(columns, feature, detail))
                    .collect(),
            })
            .collect(),
    }
}

fn feature_row(columns: &[Column], feature: &UnifiedFeature, detail: DetailLevel) -> FeatureRow {
    let cells = columns
        .iter()
        .map(|column| {
            let status = feature.status_for(&column.key);
            match detail {
                DetailLevel::Full => Cell::Status(status.as_str()),
                DetailLevel::Presence => Cell::Present(status.is_present()),
            }
        })
        .collect();

    FeatureRow {
        name: feature.name.clone(),
        description: feature.description.clone(),
        link: feature.link.clone(),
        is_diff: feature.is_diff,
        cells,
    }
}

/// One line of the `sources` listing.
#[derive(Debug, Serialize)]
pub struct SourceSummary {
    pub id: String,
    pub title: String,
    pub tiers: Vec<String>,
    pub features: usize,
}

impl SourceSummary {
    pub fn from_document(document: &SourceDocument) -> Self {
        Self {
            id: document.id.clone(),
            title: document.title.clone(),
            tiers: document.taxonomy.tiers.clone(),
            features: document.taxonomy.feature_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tierlens_engine::ColumnKey;
    use tierlens_model::TierStatus;

    use super::*;

    fn sample() -> (Vec<Column>, Vec<UnifiedCategory>) {
        let a = ColumnKey::new("ent", "E3");
        let b = ColumnKey::new("ent", "E5");
        let columns = vec![
            Column::new(a.clone(), "Enterprise"),
            Column::new(b.clone(), "Enterprise"),
        ];

        let mut status = HashMap::new();
        status.insert(a.clone(), TierStatus::AddOn);
        status.insert(b, TierStatus::Included);
        let feature = UnifiedFeature {
            name: "Defender".to_string(),
            description: "Threat protection".to_string(),
            link: None,
            status,
            origins: vec![a],
            is_diff: true,
        };

        let categories = vec![UnifiedCategory {
            name: "Security".to_string(),
            features: vec![feature],
        }];
        (columns, categories)
    }

    #[test]
    fn full_detail_renders_status_labels_in_column_order() {
        let (columns, categories) = sample();
        let output = view_output(&columns, &categories, DetailLevel::Full);

        assert_eq!(output.columns, vec!["Enterprise - E3", "Enterprise - E5"]);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json["categories"][0]["features"][0]["cells"],
            serde_json::json!(["add-on", "included"])
        );
    }

    #[test]
    fn presence_detail_renders_booleans() {
        let (columns, categories) = sample();
        let output = view_output(&columns, &categories, DetailLevel::Presence);

        let json = serde_json::to_value(&output).unwrap();
        // An add-on is purchasable, not granted.
        assert_eq!(
            json["categories"][0]["features"][0]["cells"],
            serde_json::json!([false, true])
        );
    }

    #[test]
    fn cells_print_for_humans() {
        assert_eq!(Cell::Status("partial").to_string(), "partial");
        assert_eq!(Cell::Present(true).to_string(), "yes");
        assert_eq!(Cell::Present(false).to_string(), "no");
    }
}
