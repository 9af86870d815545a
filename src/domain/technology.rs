use std::{fmt, str::FromStr};

/// A technology grouping for techniques.
///
/// This is a closed enumeration: every first-level directory of the
/// techniques corpus must name one of these values, and every value is
/// present in the built catalog even when its directory is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Technology {
    /// WAI-ARIA techniques.
    Aria,
    /// Client-side scripting techniques.
    ClientSideScript,
    /// CSS techniques.
    Css,
    /// Documented failures of success criteria.
    Failures,
    /// Flash techniques (retained for historical publications).
    Flash,
    /// Technology-agnostic techniques.
    General,
    /// HTML techniques.
    Html,
    /// PDF techniques.
    Pdf,
    /// Server-side scripting techniques.
    ServerSideScript,
    /// Silverlight techniques (retained for historical publications).
    Silverlight,
    /// SMIL techniques.
    Smil,
    /// Plain-text techniques.
    Text,
}

impl Technology {
    /// Every technology, in publication order.
    pub const ALL: [Self; 12] = [
        Self::Aria,
        Self::ClientSideScript,
        Self::Css,
        Self::Failures,
        Self::Flash,
        Self::General,
        Self::Html,
        Self::Pdf,
        Self::ServerSideScript,
        Self::Silverlight,
        Self::Smil,
        Self::Text,
    ];

    /// The directory name of this technology's partition.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aria => "aria",
            Self::ClientSideScript => "client-side-script",
            Self::Css => "css",
            Self::Failures => "failures",
            Self::Flash => "flash",
            Self::General => "general",
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::ServerSideScript => "server-side-script",
            Self::Silverlight => "silverlight",
            Self::Smil => "smil",
            Self::Text => "text",
        }
    }

    /// The display title used for this technology's section heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Aria => "ARIA Techniques",
            Self::ClientSideScript => "Client-Side Script Techniques",
            Self::Css => "CSS Techniques",
            Self::Failures => "Common Failures",
            Self::Flash => "Flash Techniques",
            Self::General => "General Techniques",
            Self::Html => "HTML Techniques",
            Self::Pdf => "PDF Techniques",
            Self::ServerSideScript => "Server-Side Script Techniques",
            Self::Silverlight => "Silverlight Techniques",
            Self::Smil => "SMIL Techniques",
            Self::Text => "Plain-Text Techniques",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known technology.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown technology '{0}'")]
pub struct UnknownTechnology(String);

impl FromStr for Technology {
    type Err = UnknownTechnology;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|technology| technology.as_str() == s)
            .ok_or_else(|| UnknownTechnology(s.to_string()))
    }
}
