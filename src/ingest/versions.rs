//! Version membership of understanding documents.

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use tracing::warn;

use crate::{
    domain::WcagVersion,
    ingest::{locate, LocateError},
};

/// Maps success criterion identifiers to the standard revision whose
/// understanding corpus contains them.
///
/// The index is derived purely from directory membership: a criterion's
/// identifier is the basename of its understanding document, and its
/// version is the partition that document was found under. Once built, the
/// index is read-only input to the taxonomy builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionIndex {
    by_id: HashMap<String, WcagVersion>,
    basenames: BTreeMap<WcagVersion, Vec<String>>,
}

impl VersionIndex {
    /// Builds the index by scanning the understanding corpus under `root`.
    ///
    /// A basename appearing under more than one version keeps the
    /// last-scanned (newest) entry; the collision is surfaced as a warning
    /// rather than an error, since a basename may legitimately recur
    /// across revisions.
    ///
    /// # Errors
    ///
    /// Fails when the corpus contains a partition that is not a known
    /// version, or when the traversal itself fails.
    pub fn build(root: &Path) -> Result<Self, LocateError> {
        let located = locate::<WcagVersion>(root)?;

        let mut by_id = HashMap::new();
        let mut basenames: BTreeMap<WcagVersion, Vec<String>> = WcagVersion::ALL
            .into_iter()
            .map(|version| (version, Vec::new()))
            .collect();

        for (version, paths) in located {
            let mut stems: Vec<String> = paths
                .iter()
                .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()))
                .map(str::to_string)
                .collect();

            for stem in &stems {
                if let Some(previous) = by_id.insert(stem.clone(), version) {
                    warn!(
                        "understanding document '{stem}' appears under both {previous} and \
                         {version}; keeping {version}"
                    );
                }
            }

            stems.sort_unstable();
            basenames.insert(version, stems);
        }

        Ok(Self { by_id, basenames })
    }

    /// Looks up the version a criterion belongs to.
    #[must_use]
    pub fn version_of(&self, id: &str) -> Option<WcagVersion> {
        self.by_id.get(id).copied()
    }

    /// The basenames discovered under `version`, lexicographically sorted.
    #[must_use]
    pub fn basenames(&self, version: WcagVersion) -> &[String] {
        self.basenames
            .get(&version)
            .map_or(&[], Vec::as_slice)
    }

    /// The number of distinct identifiers in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the index holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
