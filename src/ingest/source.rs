//! Orchestration of a full source-tree load.
//!
//! [`Source`] mirrors the on-disk layout of a publication checkout; a
//! successful [`Source::load`] produces the immutable [`SiteGraph`] the
//! render pipeline reads. There is no partial-results path: any fatal
//! resolution failure aborts the whole load.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    domain::{Config, Taxonomy},
    ingest::{build_taxonomy, Catalog, CatalogError, LocateError, TaxonomyError, VersionIndex},
};

/// A publication source tree, prior to loading.
#[derive(Debug, Clone)]
pub struct Source {
    /// The root of the source checkout.
    root: PathBuf,
    config: Config,
}

impl Source {
    /// Opens a source tree at the given root, reading `config.toml` from
    /// it when present and falling back to defaults otherwise.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        let config = load_config(&root);
        Self { root, config }
    }

    /// Opens a source tree with an explicit configuration.
    #[must_use]
    pub const fn with_config(root: PathBuf, config: Config) -> Self {
        Self { root, config }
    }

    /// The configured source root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Loads every corpus and builds the document graph.
    ///
    /// The version membership index is built first; the taxonomy consumes
    /// it; the technique catalog is independent of both. Numbering and
    /// ordering follow the source documents, so repeated loads of an
    /// unchanged tree yield identical graphs.
    ///
    /// # Errors
    ///
    /// Any fatal layout, structural or extraction error aborts the load
    /// and identifies the offending identifier or path.
    pub fn load(self) -> Result<SiteGraph, BuildError> {
        let versions = VersionIndex::build(&self.root.join(self.config.understanding_dir()))?;
        debug!("version index holds {} identifiers", versions.len());

        let taxonomy = build_taxonomy(&self.root.join(self.config.guidelines_index()), &versions)?;
        let catalog = Catalog::build(&self.root.join(self.config.techniques_dir()))?;

        info!(
            "loaded {} principles and {} techniques",
            taxonomy.principles().len(),
            catalog.len()
        );

        Ok(SiteGraph {
            taxonomy,
            catalog,
            versions,
        })
    }
}

fn load_config(root: &Path) -> Config {
    let path = root.join("config.toml");
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

/// The fully loaded, immutable document graph.
///
/// Constructed once per run; a source change requires a full rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteGraph {
    pub(crate) taxonomy: Taxonomy,
    pub(crate) catalog: Catalog,
    pub(crate) versions: VersionIndex,
}

impl SiteGraph {
    /// The guidelines taxonomy tree.
    #[must_use]
    pub const fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// The technique catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The version membership index the taxonomy was resolved against.
    #[must_use]
    pub const fn versions(&self) -> &VersionIndex {
        &self.versions
    }
}

/// Errors that can occur while loading a source tree.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A corpus layout defect.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// The guidelines index could not be parsed.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    /// The technique catalog could not be built.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
