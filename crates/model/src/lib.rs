//! Shared data contract for tier comparison: source documents, their
//! extracted taxonomies, and the user's comparison selection.

mod document;
mod selection;
mod status;
mod taxonomy;

pub use document::SourceDocument;
pub use selection::{Selection, SelectionEntry};
pub use status::TierStatus;
pub use taxonomy::{Category, Feature, SourceTaxonomy};
