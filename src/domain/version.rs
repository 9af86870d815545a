use std::{fmt, str::FromStr};

/// A revision of the guidelines standard.
///
/// Revisions are ordered chronologically. The understanding corpus is
/// partitioned by the two-digit directory names these variants parse from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WcagVersion {
    /// WCAG 2.0.
    Wcag20,
    /// WCAG 2.1.
    Wcag21,
    /// WCAG 2.2.
    Wcag22,
}

impl WcagVersion {
    /// Every revision, oldest first.
    pub const ALL: [Self; 3] = [Self::Wcag20, Self::Wcag21, Self::Wcag22];

    /// The revision that principles and unpinned guidelines default to.
    pub const BASE: Self = Self::Wcag20;

    /// The two-digit directory name of this revision's partition.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wcag20 => "20",
            Self::Wcag21 => "21",
            Self::Wcag22 => "22",
        }
    }
}

impl fmt::Display for WcagVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known revision.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown standard version '{0}'")]
pub struct UnknownVersion(String);

impl FromStr for WcagVersion {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|version| version.as_str() == s)
            .ok_or_else(|| UnknownVersion(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_chronologically_ordered() {
        assert!(WcagVersion::Wcag20 < WcagVersion::Wcag21);
        assert!(WcagVersion::Wcag21 < WcagVersion::Wcag22);
    }

    #[test]
    fn directory_names_round_trip() {
        for version in WcagVersion::ALL {
            let parsed: WcagVersion = version.as_str().parse().unwrap();
            assert_eq!(parsed, version);
        }
    }

    #[test]
    fn malformed_version_is_rejected() {
        assert!("2.0".parse::<WcagVersion>().is_err());
        assert!("23".parse::<WcagVersion>().is_err());
        assert!(String::new().parse::<WcagVersion>().is_err());
    }
}
