//! Source document storage: the repository seam the merge engine reads
//! through, plus JSON ingestion for stored documents.

mod error;
mod loader;
mod store;

pub use error::{CatalogError, Result};
pub use loader::{document_from_json, load_catalog, load_document};
pub use store::{MemoryCatalog, SourceCatalog};
