//! Document discovery by directory convention.
//!
//! Both corpora store documents exactly two levels deep: a partition
//! directory naming a value of a closed enumeration, then the document
//! file itself. Anything shallower or deeper is not a corpus document.

use std::{
    collections::BTreeMap,
    ffi::OsStr,
    path::{Path, PathBuf},
    str::FromStr,
};

use walkdir::WalkDir;

/// Enumerates `<partition>/<file>.html` documents under `root`.
///
/// Paths are grouped by partition and returned in lexicographic traversal
/// order, which downstream builders rely on for deterministic output.
/// Files that are not exactly two levels deep, or that do not carry the
/// `.html` extension, are ignored.
///
/// # Errors
///
/// Returns [`LocateError::UnknownPartition`] when a matching document sits
/// under a directory that does not parse as `P`. This is a fatal layout
/// defect: it means a misplaced file or an unregistered partition, not a
/// recoverable condition. Traversal failures surface as
/// [`LocateError::Walk`].
pub fn locate<P>(root: &Path) -> Result<BTreeMap<P, Vec<PathBuf>>, LocateError>
where
    P: FromStr + Ord,
{
    let mut partitions: BTreeMap<P, Vec<PathBuf>> = BTreeMap::new();

    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.path().extension() != Some(OsStr::new("html")) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let segment = relative
            .components()
            .next()
            .and_then(|component| component.as_os_str().to_str())
            .unwrap_or_default();

        let partition = P::from_str(segment).map_err(|_| LocateError::UnknownPartition {
            partition: segment.to_string(),
            path: entry.path().to_path_buf(),
        })?;

        partitions
            .entry(partition)
            .or_default()
            .push(entry.into_path());
    }

    Ok(partitions)
}

/// Errors that can occur while locating corpus documents.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// A document was found under a directory that is not a registered
    /// partition.
    #[error("unrecognised partition '{partition}' (found {})", path.display())]
    UnknownPartition {
        /// The offending directory name.
        partition: String,
        /// The document that triggered the failure.
        path: PathBuf,
    },

    /// The directory traversal itself failed.
    #[error("failed to traverse corpus: {0}")]
    Walk(#[from] walkdir::Error),
}
