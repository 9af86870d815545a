//! Filesystem discovery and parsing of source documents.
//!
//! Ingestion is a single pass per run: the version membership index is
//! built first, then the taxonomy (which consumes it), then the technique
//! catalog. Each component reads immutable file content and returns freshly
//! allocated structures; nothing is updated incrementally.

/// Document discovery by directory convention.
pub mod locator;
pub use locator::{locate, LocateError};

/// First-heading extraction.
pub mod heading;
pub use heading::{extract_title, ExtractError};

mod versions;
pub use versions::VersionIndex;

mod taxonomy;
pub use taxonomy::{build_taxonomy, taxonomy_from_html, TaxonomyError};

mod techniques;
pub use techniques::{Catalog, CatalogError, ExtractFailures};

mod source;
pub use source::{BuildError, SiteGraph, Source};

#[cfg(test)]
pub(crate) mod fixture;
