//! The guidelines taxonomy.
//!
//! The taxonomy is a strictly ordered three-level tree: Principles own
//! Guidelines, Guidelines own Success Criteria. Positional `num` codes are
//! recomputed from tree position on every build and never persisted; the
//! identifiers (`id`) are the stable keys and are globally unique across
//! all three node kinds.

use std::{fmt, str::FromStr};

use super::WcagVersion;

/// A conformance level of a success criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Level A (minimum conformance).
    A,
    /// Level AA.
    AA,
    /// Level AAA (maximum conformance).
    AAA,
}

impl Level {
    /// The marker text for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AA => "AA",
            Self::AAA => "AAA",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a conformance level.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown conformance level '{0}'")]
pub struct UnknownLevel(String);

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "AA" => Ok(Self::AA),
            "AAA" => Ok(Self::AAA),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

/// The top level of the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principle {
    /// Identifier taken from the index document's section attribute.
    pub id: String,

    /// Display name, the trimmed text of the section's heading.
    pub name: String,

    /// Positional code, e.g. `"1"`. 1-based, reassigned every build.
    pub num: String,

    /// The revision this node belongs to. Principles are not versioned
    /// independently and always carry the base revision.
    pub version: WcagVersion,

    /// Guidelines in source order.
    pub guidelines: Vec<Guideline>,
}

/// The middle level of the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guideline {
    /// Identifier taken from the index document's section attribute.
    pub id: String,

    /// Display name, the trimmed text of the section's heading.
    pub name: String,

    /// Positional code, e.g. `"1.3"`.
    pub num: String,

    /// The revision this guideline was introduced by.
    pub version: WcagVersion,

    /// Success criteria in source order.
    pub success_criteria: Vec<SuccessCriterion>,
}

/// A leaf of the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessCriterion {
    /// Identifier taken from the index document's section attribute.
    pub id: String,

    /// Display name, the trimmed text of the section's heading.
    pub name: String,

    /// Positional code, e.g. `"1.3.5"`.
    pub num: String,

    /// Conformance level parsed from the section's level marker.
    pub level: Level,

    /// The revision whose understanding corpus contains this criterion.
    pub version: WcagVersion,
}

/// The fully built taxonomy tree.
///
/// Built once per run and treated as an immutable snapshot; the flattened
/// maps the resolver derives from it are read-only views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    principles: Vec<Principle>,
}

impl Taxonomy {
    pub(crate) const fn new(principles: Vec<Principle>) -> Self {
        Self { principles }
    }

    /// The principles in source order.
    #[must_use]
    pub fn principles(&self) -> &[Principle] {
        &self.principles
    }

    /// Iterates every guideline in tree order.
    pub fn guidelines(&self) -> impl Iterator<Item = &Guideline> {
        self.principles
            .iter()
            .flat_map(|principle| principle.guidelines.iter())
    }

    /// Iterates every success criterion in tree order.
    pub fn success_criteria(&self) -> impl Iterator<Item = &SuccessCriterion> {
        self.guidelines()
            .flat_map(|guideline| guideline.success_criteria.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(id: &str, num: &str) -> SuccessCriterion {
        SuccessCriterion {
            id: id.to_string(),
            name: id.to_string(),
            num: num.to_string(),
            level: Level::A,
            version: WcagVersion::BASE,
        }
    }

    fn small_tree() -> Taxonomy {
        Taxonomy::new(vec![Principle {
            id: "perceivable".to_string(),
            name: "Perceivable".to_string(),
            num: "1".to_string(),
            version: WcagVersion::BASE,
            guidelines: vec![
                Guideline {
                    id: "text-alternatives".to_string(),
                    name: "Text Alternatives".to_string(),
                    num: "1.1".to_string(),
                    version: WcagVersion::BASE,
                    success_criteria: vec![criterion("non-text-content", "1.1.1")],
                },
                Guideline {
                    id: "time-based-media".to_string(),
                    name: "Time-based Media".to_string(),
                    num: "1.2".to_string(),
                    version: WcagVersion::BASE,
                    success_criteria: vec![
                        criterion("audio-only-and-video-only-prerecorded", "1.2.1"),
                        criterion("captions-prerecorded", "1.2.2"),
                    ],
                },
            ],
        }])
    }

    #[test]
    fn guidelines_iterate_in_tree_order() {
        let taxonomy = small_tree();
        let nums: Vec<&str> = taxonomy.guidelines().map(|g| g.num.as_str()).collect();
        assert_eq!(nums, ["1.1", "1.2"]);
    }

    #[test]
    fn success_criteria_iterate_in_tree_order() {
        let taxonomy = small_tree();
        let nums: Vec<&str> = taxonomy
            .success_criteria()
            .map(|sc| sc.num.as_str())
            .collect();
        assert_eq!(nums, ["1.1.1", "1.2.1", "1.2.2"]);
    }

    #[test]
    fn level_parsing() {
        assert_eq!("A".parse::<Level>().unwrap(), Level::A);
        assert_eq!("AA".parse::<Level>().unwrap(), Level::AA);
        assert_eq!("AAA".parse::<Level>().unwrap(), Level::AAA);
        assert!("AAAA".parse::<Level>().is_err());
        assert!("a".parse::<Level>().is_err());
    }
}
