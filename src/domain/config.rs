use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for a publication source tree.
///
/// This struct holds the corpus layout settings: where the techniques and
/// understanding corpora live relative to the source root, where the
/// guidelines index document is, and optionally where the rule-mapping
/// table is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Subdirectory of the source root holding the techniques corpus,
    /// partitioned by technology.
    techniques_dir: String,

    /// Subdirectory of the source root holding the understanding corpus,
    /// partitioned by standard revision.
    understanding_dir: String,

    /// Path of the authoritative guidelines index document, relative to
    /// the source root.
    guidelines_index: String,

    /// Path of the rule-mapping table, relative to the source root.
    ///
    /// When absent, the build runs without rule filters unless a table is
    /// supplied on the command line.
    rules_table: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            techniques_dir: default_techniques_dir(),
            understanding_dir: default_understanding_dir(),
            guidelines_index: default_guidelines_index(),
            rules_table: None,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content
    /// is invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML
    /// or if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the techniques corpus subdirectory.
    #[must_use]
    pub fn techniques_dir(&self) -> &str {
        &self.techniques_dir
    }

    /// Returns the understanding corpus subdirectory.
    #[must_use]
    pub fn understanding_dir(&self) -> &str {
        &self.understanding_dir
    }

    /// Returns the guidelines index path.
    #[must_use]
    pub fn guidelines_index(&self) -> &str {
        &self.guidelines_index
    }

    /// Returns the configured rule-mapping table path, if any.
    #[must_use]
    pub fn rules_table(&self) -> Option<&str> {
        self.rules_table.as_deref()
    }
}

fn default_techniques_dir() -> String {
    "techniques".to_string()
}

fn default_understanding_dir() -> String {
    "understanding".to_string()
}

fn default_guidelines_index() -> String {
    "guidelines/index.html".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_techniques_dir")]
        techniques_dir: String,

        #[serde(default = "default_understanding_dir")]
        understanding_dir: String,

        #[serde(default = "default_guidelines_index")]
        guidelines_index: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        rules_table: Option<String>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                techniques_dir,
                understanding_dir,
                guidelines_index,
                rules_table,
            } => Self {
                techniques_dir,
                understanding_dir,
                guidelines_index,
                rules_table,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            techniques_dir: config.techniques_dir,
            understanding_dir: config.understanding_dir,
            guidelines_index: config.guidelines_index,
            rules_table: config.rules_table,
        }
    }
}
