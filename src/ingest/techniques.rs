//! Discovery of the techniques corpus.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use nonempty::NonEmpty;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    domain::{Technique, TechniqueId, Technology},
    ingest::{extract_title, heading::ExtractError, locate, LocateError},
};

/// The techniques discovered under a source tree, grouped by technology.
///
/// Every enumerated technology is present, with an empty list when the
/// corpus has no documents for it. Within a technology, techniques are
/// totally ordered by the numeric suffix of their identifier; ties keep
/// discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    techniques: BTreeMap<Technology, Vec<Technique>>,
}

impl Catalog {
    /// Scans the techniques corpus under `root` and reads every document's
    /// display label.
    ///
    /// Labels are read in parallel; discovery order is preserved before
    /// the final sort, so the tie-break is stable.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Locate`] for corpus layout defects,
    /// [`CatalogError::InvalidId`] when a document's filename stem is not
    /// a valid technique identifier, and [`CatalogError::Extract`] listing
    /// every document whose label could not be read. Label extraction does
    /// *not* fail fast: all documents are attempted before the error is
    /// returned.
    pub fn build(root: &Path) -> Result<Self, CatalogError> {
        let located = locate::<Technology>(root)?;

        let mut techniques: BTreeMap<Technology, Vec<Technique>> = Technology::ALL
            .into_iter()
            .map(|technology| (technology, Vec::new()))
            .collect();

        let mut failures = Vec::new();

        for (technology, paths) in located {
            let ids = paths
                .iter()
                .map(|path| parse_id(path))
                .collect::<Result<Vec<_>, _>>()?;

            let labels: Vec<Result<String, ExtractError>> =
                paths.par_iter().map(|path| extract_title(path)).collect();

            let mut list = Vec::with_capacity(ids.len());
            for (id, label) in ids.into_iter().zip(labels) {
                match label {
                    Ok(title_html) => list.push(Technique { id, title_html }),
                    Err(error) => failures.push(error),
                }
            }

            list.sort_by_key(|technique| technique.id.number());
            techniques.insert(technology, list);
        }

        if let Some(failures) = NonEmpty::from_vec(failures) {
            return Err(CatalogError::Extract(ExtractFailures { failures }));
        }

        Ok(Self { techniques })
    }

    /// The techniques of one technology, in catalog order.
    #[must_use]
    pub fn get(&self, technology: Technology) -> &[Technique] {
        self.techniques
            .get(&technology)
            .map_or(&[], Vec::as_slice)
    }

    /// Iterates technologies in publication order with their techniques.
    pub fn iter(&self) -> impl Iterator<Item = (Technology, &[Technique])> {
        Technology::ALL
            .into_iter()
            .map(|technology| (technology, self.get(technology)))
    }

    /// The total number of techniques across all technologies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.techniques.values().map(Vec::len).sum()
    }

    /// Whether the catalog holds no techniques at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.techniques.values().all(Vec::is_empty)
    }
}

fn parse_id(path: &Path) -> Result<TechniqueId, CatalogError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.parse().ok())
        .ok_or_else(|| CatalogError::InvalidId {
            path: path.to_path_buf(),
        })
}

/// Errors that can occur while building the technique catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The corpus layout is invalid.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// A document's filename stem is not a valid technique identifier.
    #[error("'{}' is not named after a technique id", path.display())]
    InvalidId {
        /// The offending document.
        path: PathBuf,
    },

    /// One or more documents have no extractable label.
    #[error(transparent)]
    Extract(ExtractFailures),
}

/// Every document whose label could not be extracted.
#[derive(Debug, thiserror::Error)]
pub struct ExtractFailures {
    failures: NonEmpty<ExtractError>,
}

impl fmt::Display for ExtractFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_DISPLAY: usize = 5;

        write!(f, "failed to extract labels: ")?;

        let total = self.failures.len();

        let displayed: Vec<String> = self
            .failures
            .iter()
            .take(MAX_DISPLAY)
            .map(ToString::to_string)
            .collect();

        let msg = displayed.join(", ");

        if total <= MAX_DISPLAY {
            write!(f, "{msg}")
        } else {
            write!(f, "{msg}... (and {} more)", total - MAX_DISPLAY)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_technique(root: &Path, relative: &str, title: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("<html><h1>{title}</h1></html>")).unwrap();
    }

    #[test]
    fn every_technology_is_present_even_when_empty() {
        let tmp = TempDir::new().unwrap();
        write_technique(tmp.path(), "css/C1.html", "Styling");

        let catalog = Catalog::build(tmp.path()).unwrap();

        for technology in Technology::ALL {
            // An empty list, not a missing key.
            let _ = catalog.get(technology);
        }
        assert_eq!(catalog.get(Technology::Css).len(), 1);
        assert!(catalog.get(Technology::Smil).is_empty());
        assert_eq!(catalog.iter().count(), Technology::ALL.len());
    }

    #[test]
    fn empty_corpus_yields_empty_lists_for_all_keys() {
        let tmp = TempDir::new().unwrap();

        let catalog = Catalog::build(tmp.path()).unwrap();

        assert!(catalog.is_empty());
        assert_eq!(catalog.iter().count(), Technology::ALL.len());
    }

    #[test]
    fn techniques_are_sorted_by_numeric_suffix() {
        let tmp = TempDir::new().unwrap();
        write_technique(tmp.path(), "general/G10.html", "Ten");
        write_technique(tmp.path(), "general/G2.html", "Two");
        write_technique(tmp.path(), "general/G1.html", "One");

        let catalog = Catalog::build(tmp.path()).unwrap();
        let ids: Vec<String> = catalog
            .get(Technology::General)
            .iter()
            .map(|t| t.id.to_string())
            .collect();

        assert_eq!(ids, ["G1", "G2", "G10"]);
    }

    #[test]
    fn equal_numbers_keep_discovery_order() {
        let tmp = TempDir::new().unwrap();
        write_technique(tmp.path(), "failures/F1.html", "First failure");
        write_technique(tmp.path(), "failures/FA1.html", "Also first");
        write_technique(tmp.path(), "failures/F2.html", "Second failure");

        let catalog = Catalog::build(tmp.path()).unwrap();
        let ids: Vec<String> = catalog
            .get(Technology::Failures)
            .iter()
            .map(|t| t.id.to_string())
            .collect();

        // F1 and FA1 share the numeric suffix 1; lexicographic discovery
        // order breaks the tie.
        assert_eq!(ids, ["F1", "FA1", "F2"]);
    }

    #[test]
    fn labels_come_from_the_first_heading() {
        let tmp = TempDir::new().unwrap();
        write_technique(
            tmp.path(),
            "html/H37.html",
            "Using <code>alt</code> attributes on <code>img</code> elements",
        );

        let catalog = Catalog::build(tmp.path()).unwrap();
        let technique = &catalog.get(Technology::Html)[0];

        assert_eq!(technique.id.to_string(), "H37");
        assert_eq!(
            technique.title_html,
            "Using <code>alt</code> attributes on <code>img</code> elements"
        );
    }

    #[test]
    fn invalid_filename_stem_fails_fast() {
        let tmp = TempDir::new().unwrap();
        write_technique(tmp.path(), "css/notes.html", "Notes");

        let error = Catalog::build(tmp.path()).unwrap_err();
        match error {
            CatalogError::InvalidId { path } => assert!(path.ends_with("css/notes.html")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_technology_partition_fails_fast() {
        let tmp = TempDir::new().unwrap();
        write_technique(tmp.path(), "css/C1.html", "Styling");
        write_technique(tmp.path(), "vbscript/V1.html", "Legacy");

        let error = Catalog::build(tmp.path()).unwrap_err();
        assert!(matches!(
            error,
            CatalogError::Locate(LocateError::UnknownPartition { .. })
        ));
    }

    #[test]
    fn extraction_failures_are_aggregated() {
        let tmp = TempDir::new().unwrap();
        write_technique(tmp.path(), "general/G1.html", "Fine");
        fs::write(tmp.path().join("general/G2.html"), "<p>no heading</p>").unwrap();
        fs::write(tmp.path().join("general/G3.html"), "<p>none here either</p>").unwrap();

        let error = Catalog::build(tmp.path()).unwrap_err();
        match error {
            CatalogError::Extract(failures) => {
                let message = failures.to_string();
                assert!(message.contains("G2.html"));
                assert!(message.contains("G3.html"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
