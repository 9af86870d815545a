//! Build engine for the WCAG guidelines publication
//!
//! Source documents are HTML files stored in a directory tree: an
//! "understanding" corpus partitioned by standard revision, a "techniques"
//! corpus partitioned by technology, and a single authoritative guidelines
//! index. The engine resolves them into one cross-linked, immutable document
//! graph that a page-rendering pipeline reads by identifier.

pub mod domain;
pub use domain::{
    Config, Guideline, Level, Principle, Rule, SuccessCriterion, Taxonomy, Technique, TechniqueId,
    Technology, WcagVersion,
};

/// Filesystem discovery and parsing of source documents.
pub mod ingest;
pub use ingest::{BuildError, Catalog, SiteGraph, Source, VersionIndex};

/// Cross-reference resolution over a loaded site graph.
pub mod resolve;
pub use resolve::CrossRefs;
