//! First-heading extraction.
//!
//! A document's display label is the inner markup of its first `<h1>`.
//! Labels keep inline markup (`<code>`, abbreviations) so consumers can
//! embed them directly into link text.

use std::{
    io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use scraper::{Html, Selector};

static H1: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("static selector must parse"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("static pattern must compile"));

/// Extracts the label of the document at `path`.
///
/// Runs of two or more whitespace characters are collapsed to a single
/// space, so multi-line source headings become single-line labels.
///
/// # Errors
///
/// Returns [`ExtractError::Io`] if the document cannot be read and
/// [`ExtractError::MissingHeading`] if it has no `<h1>` element.
pub fn extract_title(path: &Path) -> Result<String, ExtractError> {
    let html = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    title_from_html(&html).ok_or_else(|| ExtractError::MissingHeading {
        path: path.to_path_buf(),
    })
}

/// Extracts the first `<h1>`'s inner markup from already loaded HTML.
///
/// Returns `None` when the document has no `<h1>` element.
#[must_use]
pub fn title_from_html(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let heading = document.select(&H1).next()?;
    let inner = heading.inner_html();

    Some(WHITESPACE_RUN.replace_all(inner.trim(), " ").into_owned())
}

/// Errors that can occur when extracting a document label.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The document has no top-level heading.
    #[error("no <h1> heading in {}", path.display())]
    MissingHeading {
        /// The offending document.
        path: PathBuf,
    },
}
