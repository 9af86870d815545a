//! Construction of the guidelines taxonomy from the index document.
//!
//! The index document is the single authoritative source of taxonomy
//! structure: nested `section` elements marked `.principle`, `.guideline`
//! and `.sc`, each carrying an `id` attribute and a heading. Section order
//! in the document is authoritative and is preserved as written.

use std::{
    io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use scraper::{ElementRef, Html, Selector};

use crate::{
    domain::{
        taxonomy::{Guideline, Level, Principle, SuccessCriterion, Taxonomy},
        WcagVersion,
    },
    ingest::VersionIndex,
};

/// Guidelines pinned to a later revision than their position implies.
///
/// Guideline 2.5 (`input-modalities`) was introduced by WCAG 2.1 inside an
/// existing principle without renumbering its siblings, so its version
/// cannot be inferred from structure. Consulted before the base-version
/// default; additions here must stay auditable.
const VERSION_OVERRIDES: [(&str, WcagVersion); 1] = [("input-modalities", WcagVersion::Wcag21)];

static PRINCIPLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".principle").expect("static selector must parse"));

static GUIDELINE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".guideline").expect("static selector must parse"));

static SC: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".sc").expect("static selector must parse"));

static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("static selector must parse"));

static LEVEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".conformance-level").expect("static selector must parse"));

/// Parses the authoritative index document at `index` into the taxonomy.
///
/// # Errors
///
/// Fails when the document cannot be read, when a section is structurally
/// incomplete (missing id, heading or conformance level), or when a
/// success criterion's identifier is absent from the version index.
pub fn build_taxonomy(index: &Path, versions: &VersionIndex) -> Result<Taxonomy, TaxonomyError> {
    let html = std::fs::read_to_string(index).map_err(|source| TaxonomyError::Io {
        path: index.to_path_buf(),
        source,
    })?;

    taxonomy_from_html(&html, versions)
}

/// Parses an already loaded index document.
///
/// Positional `num` codes are assigned from traversal order, 1-based at
/// every level. The iteration is inherently sequential; numbering depends
/// on it.
///
/// # Errors
///
/// See [`build_taxonomy`].
pub fn taxonomy_from_html(html: &str, versions: &VersionIndex) -> Result<Taxonomy, TaxonomyError> {
    let document = Html::parse_document(html);

    let mut principles = Vec::new();
    for (principle_pos, principle_el) in document.select(&PRINCIPLE).enumerate() {
        let principle_num = (principle_pos + 1).to_string();
        let (principle_id, principle_name) = identify(principle_el, &principle_num)?;

        let mut guidelines = Vec::new();
        for (guideline_pos, guideline_el) in principle_el.select(&GUIDELINE).enumerate() {
            let guideline_num = format!("{principle_num}.{}", guideline_pos + 1);
            let (guideline_id, guideline_name) = identify(guideline_el, &guideline_num)?;
            let guideline_version = version_override(&guideline_id).unwrap_or(WcagVersion::BASE);

            let mut success_criteria = Vec::new();
            for (sc_pos, sc_el) in guideline_el.select(&SC).enumerate() {
                let sc_num = format!("{guideline_num}.{}", sc_pos + 1);
                let (sc_id, sc_name) = identify(sc_el, &sc_num)?;
                let level = conformance_level(sc_el, &sc_id)?;
                let version = versions
                    .version_of(&sc_id)
                    .ok_or_else(|| TaxonomyError::UnresolvedVersion { id: sc_id.clone() })?;

                success_criteria.push(SuccessCriterion {
                    id: sc_id,
                    name: sc_name,
                    num: sc_num,
                    level,
                    version,
                });
            }

            guidelines.push(Guideline {
                id: guideline_id,
                name: guideline_name,
                num: guideline_num,
                version: guideline_version,
                success_criteria,
            });
        }

        principles.push(Principle {
            id: principle_id,
            name: principle_name,
            num: principle_num,
            version: WcagVersion::BASE,
            guidelines,
        });
    }

    Ok(Taxonomy::new(principles))
}

fn version_override(id: &str) -> Option<WcagVersion> {
    VERSION_OVERRIDES
        .iter()
        .find(|&&(pinned, _)| pinned == id)
        .map(|&(_, version)| version)
}

/// Reads a section's `id` attribute and the trimmed text of its first
/// heading.
fn identify(section: ElementRef, num: &str) -> Result<(String, String), TaxonomyError> {
    let id = section
        .value()
        .attr("id")
        .ok_or_else(|| TaxonomyError::MissingId {
            num: num.to_string(),
        })?
        .to_string();

    let name = section
        .select(&HEADING)
        .next()
        .ok_or_else(|| TaxonomyError::MissingHeading { id: id.clone() })?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    Ok((id, name))
}

fn conformance_level(section: ElementRef, id: &str) -> Result<Level, TaxonomyError> {
    let text = section
        .select(&LEVEL)
        .next()
        .ok_or_else(|| TaxonomyError::MissingLevel { id: id.to_string() })?
        .text()
        .collect::<String>();
    let trimmed = text.trim();

    trimmed.parse().map_err(|_| TaxonomyError::InvalidLevel {
        id: id.to_string(),
        level: trimmed.to_string(),
    })
}

/// Errors that can occur while building the taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    /// The index document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A section has no `id` attribute.
    #[error("section {num} has no id attribute")]
    MissingId {
        /// The positional code assigned to the section so far.
        num: String,
    },

    /// A section has no heading to take its name from.
    #[error("section '{id}' has no heading")]
    MissingHeading {
        /// The offending section's identifier.
        id: String,
    },

    /// A success criterion has no conformance-level marker.
    #[error("success criterion '{id}' has no conformance level")]
    MissingLevel {
        /// The offending criterion's identifier.
        id: String,
    },

    /// A success criterion's conformance level is not A, AA or AAA.
    #[error("success criterion '{id}' has invalid conformance level '{level}'")]
    InvalidLevel {
        /// The offending criterion's identifier.
        id: String,
        /// The unparseable marker text.
        level: String,
    },

    /// A success criterion does not appear in any version partition.
    #[error("unresolvable version for success criterion '{id}'")]
    UnresolvedVersion {
        /// The offending criterion's identifier.
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Builds a version index over the given (version, basename) pairs.
    fn version_index(entries: &[(&str, &str)]) -> VersionIndex {
        let tmp = TempDir::new().unwrap();
        for (version, basename) in entries {
            let dir = tmp.path().join(version);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(format!("{basename}.html")), "<h1>x</h1>").unwrap();
        }
        VersionIndex::build(tmp.path()).unwrap()
    }

    fn sc(id: &str, level: &str) -> String {
        format!(
            r#"<section class="sc" id="{id}"><h4>{id} name</h4><p class="conformance-level">{level}</p></section>"#
        )
    }

    #[test]
    fn assigns_positional_numbers() {
        let versions = version_index(&[
            ("20", "non-text-content"),
            ("20", "captions-prerecorded"),
            ("21", "reflow"),
        ]);
        let html = format!(
            r#"<body>
            <section class="principle" id="perceivable"><h2> Perceivable </h2>
              <section class="guideline" id="text-alternatives"><h3>Text Alternatives</h3>
                {}
              </section>
              <section class="guideline" id="time-based-media"><h3>Time-based Media</h3>
                {}
                {}
              </section>
            </section>
            </body>"#,
            sc("non-text-content", "A"),
            sc("captions-prerecorded", "A"),
            sc("reflow", "AA"),
        );

        let taxonomy = taxonomy_from_html(&html, &versions).unwrap();

        let principle = &taxonomy.principles()[0];
        assert_eq!(principle.num, "1");
        assert_eq!(principle.name, "Perceivable");
        assert_eq!(principle.version, WcagVersion::Wcag20);

        let nums: Vec<&str> = taxonomy.guidelines().map(|g| g.num.as_str()).collect();
        assert_eq!(nums, ["1.1", "1.2"]);

        let sc_nums: Vec<&str> = taxonomy
            .success_criteria()
            .map(|sc| sc.num.as_str())
            .collect();
        assert_eq!(sc_nums, ["1.1.1", "1.2.1", "1.2.2"]);

        let reflow = taxonomy
            .success_criteria()
            .find(|sc| sc.id == "reflow")
            .unwrap();
        assert_eq!(reflow.version, WcagVersion::Wcag21);
        assert_eq!(reflow.level, Level::AA);
    }

    #[test]
    fn reordering_siblings_reassigns_numbers() {
        let versions = version_index(&[
            ("20", "non-text-content"),
            ("20", "captions-prerecorded"),
        ]);

        let forward = format!(
            r#"<section class="principle" id="p"><h2>P</h2>
              <section class="guideline" id="ga"><h3>A</h3>{}</section>
              <section class="guideline" id="gb"><h3>B</h3>{}</section>
            </section>"#,
            sc("non-text-content", "A"),
            sc("captions-prerecorded", "A"),
        );
        let reversed = format!(
            r#"<section class="principle" id="p"><h2>P</h2>
              <section class="guideline" id="gb"><h3>B</h3>{}</section>
              <section class="guideline" id="ga"><h3>A</h3>{}</section>
            </section>"#,
            sc("captions-prerecorded", "A"),
            sc("non-text-content", "A"),
        );

        let find = |taxonomy: &Taxonomy, id: &str| {
            taxonomy
                .guidelines()
                .find(|g| g.id == id)
                .map(|g| g.num.clone())
                .unwrap()
        };

        let first = taxonomy_from_html(&forward, &versions).unwrap();
        assert_eq!(find(&first, "ga"), "1.1");
        assert_eq!(find(&first, "gb"), "1.2");

        let second = taxonomy_from_html(&reversed, &versions).unwrap();
        assert_eq!(find(&second, "gb"), "1.1");
        assert_eq!(find(&second, "ga"), "1.2");
    }

    #[test]
    fn input_modalities_is_pinned_regardless_of_position() {
        let versions = version_index(&[("21", "pointer-gestures"), ("20", "keyboard")]);

        // The pinned guideline listed first among its siblings.
        let html = format!(
            r#"<section class="principle" id="operable"><h2>Operable</h2>
              <section class="guideline" id="input-modalities"><h3>Input Modalities</h3>{}</section>
              <section class="guideline" id="keyboard-accessible"><h3>Keyboard Accessible</h3>{}</section>
            </section>"#,
            sc("pointer-gestures", "A"),
            sc("keyboard", "A"),
        );

        let taxonomy = taxonomy_from_html(&html, &versions).unwrap();
        let guidelines: Vec<_> = taxonomy.guidelines().collect();

        assert_eq!(guidelines[0].id, "input-modalities");
        assert_eq!(guidelines[0].num, "1.1");
        assert_eq!(guidelines[0].version, WcagVersion::Wcag21);
        assert_eq!(guidelines[1].version, WcagVersion::Wcag20);
    }

    #[test]
    fn unresolved_version_is_fatal() {
        let versions = version_index(&[("20", "non-text-content")]);
        let html = format!(
            r#"<section class="principle" id="p"><h2>P</h2>
              <section class="guideline" id="g"><h3>G</h3>{}</section>
            </section>"#,
            sc("not-in-any-version", "A"),
        );

        let error = taxonomy_from_html(&html, &versions).unwrap_err();
        match error {
            TaxonomyError::UnresolvedVersion { id } => assert_eq!(id, "not-in-any-version"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_id_is_fatal() {
        let versions = VersionIndex::default();
        let html = r#"<section class="principle"><h2>P</h2></section>"#;

        let error = taxonomy_from_html(html, &versions).unwrap_err();
        match error {
            TaxonomyError::MissingId { num } => assert_eq!(num, "1"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_conformance_level_is_fatal() {
        let versions = version_index(&[("20", "x")]);
        let html = r#"<section class="principle" id="p"><h2>P</h2>
          <section class="guideline" id="g"><h3>G</h3>
            <section class="sc" id="x"><h4>X</h4></section>
          </section>
        </section>"#;

        let error = taxonomy_from_html(html, &versions).unwrap_err();
        assert!(matches!(error, TaxonomyError::MissingLevel { .. }));
    }

    #[test]
    fn invalid_conformance_level_is_fatal() {
        let versions = version_index(&[("20", "x")]);
        let html = format!(
            r#"<section class="principle" id="p"><h2>P</h2>
              <section class="guideline" id="g"><h3>G</h3>{}</section>
            </section>"#,
            sc("x", "AAAA"),
        );

        let error = taxonomy_from_html(&html, &versions).unwrap_err();
        match error {
            TaxonomyError::InvalidLevel { id, level } => {
                assert_eq!(id, "x");
                assert_eq!(level, "AAAA");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_document_yields_empty_taxonomy() {
        let taxonomy = taxonomy_from_html("<body></body>", &VersionIndex::default()).unwrap();
        assert!(taxonomy.principles().is_empty());
    }
}
