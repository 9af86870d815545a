use std::{fmt, num::NonZeroU32, str::FromStr};

use non_empty_string::NonEmptyString;

/// A validated string containing only uppercase alphabetic characters
/// ([A-Z]+).
///
/// Used for the letter prefix of a technique identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PrefixString(NonEmptyString);

impl PrefixString {
    /// Creates a new `PrefixString` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrefixError` if the string is empty or contains
    /// characters other than uppercase letters (A-Z).
    pub fn new(s: String) -> Result<Self, InvalidPrefixError> {
        let non_empty =
            NonEmptyString::new(s.clone()).map_err(|_| InvalidPrefixError(s.clone()))?;

        if !s.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(InvalidPrefixError(s));
        }

        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PrefixString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string doesn't match the required pattern [A-Z]+.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid technique prefix '{0}': must be non-empty and contain only uppercase letters (A-Z)")]
pub struct InvalidPrefixError(String);

/// The identifier of a technique.
///
/// Format: `{PREFIX}{NUMBER}`, where:
/// - `PREFIX` is an uppercase alphabetic technology code (e.g. `G`, `SCR`,
///   `ARIA`)
/// - `NUMBER` is a positive non-zero integer
///
/// Examples: `G1`, `H44`, `SCR21`, `ARIA4`, `F65`. The identifier matches
/// the filename stem of the technique's source document. Identifiers are
/// unique within a technology, not globally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TechniqueId {
    prefix: PrefixString,
    number: NonZeroU32,
}

impl TechniqueId {
    /// Create a technique identifier from pre-validated parts.
    #[must_use]
    pub const fn new(prefix: PrefixString, number: NonZeroU32) -> Self {
        Self { prefix, number }
    }

    /// Returns the letter prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    /// Returns the numeric suffix.
    ///
    /// Catalog ordering within a technology is defined by this value.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number.get()
    }
}

impl fmt::Display for TechniqueId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.number)
    }
}

/// Errors that can occur during technique identifier parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The identifier has no numeric suffix.
    #[error("Invalid technique id format: {0}")]
    Syntax(String),

    /// The numeric suffix is not a positive non-zero integer.
    #[error("Invalid number in technique id '{0}': expected a non-zero integer, got {1}")]
    Number(String, String),

    /// The letter prefix is not uppercase alphabetic.
    #[error(transparent)]
    Prefix(#[from] InvalidPrefixError),
}

impl FromStr for TechniqueId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits_at = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| Error::Syntax(s.to_string()))?;

        let (prefix_str, number_str) = s.split_at(digits_at);

        let prefix = PrefixString::new(prefix_str.to_string())?;

        let number = number_str
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| Error::Number(s.to_string(), number_str.to_string()))?;

        Ok(Self { prefix, number })
    }
}

impl TryFrom<&str> for TechniqueId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

/// A remediation technique, as discovered in the techniques corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technique {
    /// The filename-derived identifier.
    pub id: TechniqueId,

    /// The technique's display label: the inner markup of its source
    /// document's first heading, whitespace-collapsed. May contain inline
    /// markup and is embedded directly into link labels downstream.
    pub title_html: String,
}
