//! The externally maintained rule-mapping table.
//!
//! The table is a JSON array of records, each declaring the success
//! criteria and techniques a conformance rule applies to. It is read once
//! at process start and injected into the resolver as a read-only slice.

use std::{
    io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// One record of the rule-mapping table.
///
/// Field names follow the table's JSON schema, which is a bit-exact
/// contract with the table's maintainers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Stable identifier of the rule.
    pub id: String,

    /// Human-readable rule title.
    #[serde(default)]
    pub title: String,

    /// Identifiers of the taxonomy nodes this rule applies to.
    #[serde(default)]
    pub success_criteria: Vec<String>,

    /// Identifiers of the techniques this rule applies to.
    #[serde(default)]
    pub wcag_techniques: Vec<String>,
}

/// Reads a rule-mapping table from a JSON file.
///
/// # Errors
///
/// Returns [`RulesError::Io`] if the file cannot be read and
/// [`RulesError::Json`] if its contents do not match the table schema.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>, RulesError> {
    let content = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| RulesError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur when loading the rule-mapping table.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// The table file could not be read.
    #[error("failed to read rule table {}: {source}", path.display())]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The table is not valid JSON matching the schema.
    #[error("failed to parse rule table {}: {source}", path.display())]
    Json {
        /// The path that was being parsed.
        path: PathBuf,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },
}
