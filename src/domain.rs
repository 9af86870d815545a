//! Domain models for the guidelines publication.
//!
//! This module contains the core domain types: the closed technology and
//! version enumerations, validated technique identifiers, the guidelines
//! taxonomy, and the externally maintained rule-mapping table.

mod config;
pub use config::Config;

/// The Principle → Guideline → Success Criterion tree.
pub mod taxonomy;
pub use taxonomy::{Guideline, Level, Principle, SuccessCriterion, Taxonomy};

/// Technique identifier types and parsing.
pub mod technique;
pub use technique::{Technique, TechniqueId};

/// The closed set of technique technologies.
pub mod technology;
pub use technology::Technology;

/// Standard revisions.
pub mod version;
pub use version::WcagVersion;

mod rules;
pub use rules::{load_rules, Rule, RulesError};
