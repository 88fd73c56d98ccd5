//! # Tierlens Engine
//!
//! Semantic merge of independently-extracted licensing taxonomies into one
//! comparison view.
//!
//! ## Philosophy
//!
//! Every source document describes the same product family in its own words.
//! The engine makes those descriptions comparable without editing them:
//! - Source taxonomies are read-only; every merge starts from scratch
//! - Names are compared by fingerprint, so cosmetic drift ("M365 Defender"
//!   vs "Microsoft 365 Defender") collapses while real distinctions
//!   ("Plan 1" vs "Plan 2") survive
//! - First-seen wins for display names and ordering, longest wins for
//!   descriptions
//!
//! ## Architecture
//!
//! ```text
//! Selection + SourceCatalog
//!     │
//!     ├──> Column derivation ((source, tier) keys, display labels)
//!     │
//!     ├──> Fold per selected tier
//!     │    ├─> Category find-or-create (by fingerprint)
//!     │    ├─> Feature find-or-create (by fingerprint)
//!     │    ├─> Link/description enrichment
//!     │    └─> Status fill (absent tiers -> Excluded)
//!     │
//!     └──> UnifiedTaxonomy
//!          └─> project() -> filtered view (query / categories / diff-only)
//! ```

mod fingerprint;
mod merge;
mod project;
mod unified;

pub use fingerprint::fingerprint;
pub use merge::merge;
pub use project::{project, DetailLevel, ViewFilter};
pub use unified::{Column, ColumnKey, UnifiedCategory, UnifiedFeature, UnifiedTaxonomy};
