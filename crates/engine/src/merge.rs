use std::collections::HashMap;

use tierlens_catalog::SourceCatalog;
use tierlens_model::{Selection, SourceDocument};

use crate::fingerprint::fingerprint;
use crate::unified::{Column, ColumnKey, UnifiedCategory, UnifiedFeature, UnifiedTaxonomy};

/// Merge every selected tier into one comparison.
///
/// Selection entries whose source the catalog cannot resolve are skipped;
/// an empty (or fully unresolvable) selection merges to an empty taxonomy:
/// "nothing to compare" is a result, not an error. Sources are only read,
/// and the fold is deterministic, so merging the same selection against the
/// same catalog always yields the same comparison.
#[must_use]
pub fn merge(selection: &Selection, catalog: &dyn SourceCatalog) -> UnifiedTaxonomy {
    // Columns first: every row needs a default for every column, including
    // columns whose source never mentions the feature.
    let mut columns: Vec<Column> = Vec::new();
    let mut sources: Vec<(ColumnKey, &SourceDocument)> = Vec::new();
    for entry in selection.iter() {
        let Some(document) = catalog.resolve(&entry.source_id) else {
            log::debug!("Skipping unresolvable source '{}'", entry.source_id);
            continue;
        };
        let key = ColumnKey::new(entry.source_id.clone(), entry.tier.clone());
        columns.push(Column::new(key.clone(), &document.title));
        sources.push((key, document));
    }

    if columns.is_empty() {
        return UnifiedTaxonomy::default();
    }

    let column_keys: Vec<ColumnKey> = columns.iter().map(|c| c.key.clone()).collect();

    let mut categories: Vec<UnifiedCategory> = Vec::new();
    let mut category_idx: HashMap<String, usize> = HashMap::new();
    // Feature lookups are per category, parallel to `categories`.
    let mut feature_idx: Vec<HashMap<String, usize>> = Vec::new();

    for (key, document) in &sources {
        for category in &document.taxonomy.categories {
            let cat_key = fingerprint(&category.name);
            let cat_pos = *category_idx.entry(cat_key).or_insert_with(|| {
                categories.push(UnifiedCategory {
                    name: category.name.clone(),
                    features: Vec::new(),
                });
                feature_idx.push(HashMap::new());
                categories.len() - 1
            });

            for feature in &category.features {
                let feat_key = fingerprint(&feature.name);
                let feat_pos = if let Some(&pos) = feature_idx[cat_pos].get(&feat_key) {
                    pos
                } else {
                    categories[cat_pos]
                        .features
                        .push(UnifiedFeature::seeded(feature, &column_keys));
                    let pos = categories[cat_pos].features.len() - 1;
                    feature_idx[cat_pos].insert(feat_key, pos);
                    pos
                };

                categories[cat_pos].features[feat_pos].absorb(feature, key);
            }
        }
    }

    for category in &mut categories {
        for feature in &mut category.features {
            feature.recompute_diff();
        }
    }

    let feature_count: usize = categories.iter().map(|c| c.features.len()).sum();
    log::debug!(
        "Merged {} column(s) into {} categories and {} features",
        columns.len(),
        categories.len(),
        feature_count
    );

    UnifiedTaxonomy {
        columns,
        categories,
    }
}
