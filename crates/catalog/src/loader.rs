use std::fs;
use std::path::Path;

use tierlens_model::SourceDocument;

use crate::error::Result;
use crate::store::MemoryCatalog;

/// Parse one stored document from its JSON form.
pub fn document_from_json(json: &str) -> Result<SourceDocument> {
    let document: SourceDocument = serde_json::from_str(json)?;
    Ok(document)
}

/// Load one stored document from a JSON file.
pub fn load_document(path: impl AsRef<Path>) -> Result<SourceDocument> {
    let path = path.as_ref();
    log::debug!("Loading source document from {}", path.display());
    let json = fs::read_to_string(path)?;
    document_from_json(&json)
}

/// Load documents into a fresh catalog. Insertion order follows path order,
/// so listings stay stable.
pub fn load_catalog<I, P>(paths: I) -> Result<MemoryCatalog>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut catalog = MemoryCatalog::new();
    for path in paths {
        catalog.insert(load_document(path)?)?;
    }
    log::info!("Loaded {} source document(s)", catalog.len());
    Ok(catalog)
}
