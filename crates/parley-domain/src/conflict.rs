//! Conflict domain - the contextual frame a message is read in

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contextual frame used to steer the analysis
///
/// The domain only shapes the instruction text; it is echoed back on the
/// result and never stored anywhere else.
///
/// Serializes as the full label. Deserialization goes through [`FromStr`],
/// so config files accept the same spellings as the command line.
///
/// [`FromStr`]: std::str::FromStr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ConflictDomain {
    /// Diplomatic statements, military posturing, official propaganda
    #[default]
    #[serde(rename = "International/Geopolitical")]
    International,

    /// Family disputes, friendships, community discussions
    #[serde(rename = "Interpersonal/Social")]
    Interpersonal,

    /// News clips, viral posts, political rallies
    #[serde(rename = "Media/Propaganda")]
    Media,

    /// Business negotiations and workplace conflict
    #[serde(rename = "Professional/Corporate")]
    Professional,
}

impl ConflictDomain {
    /// Every domain, in declaration order
    pub const ALL: [ConflictDomain; 4] = [
        ConflictDomain::International,
        ConflictDomain::Interpersonal,
        ConflictDomain::Media,
        ConflictDomain::Professional,
    ];

    /// Full label, embedded verbatim in instructions
    pub fn label(&self) -> &'static str {
        match self {
            ConflictDomain::International => "International/Geopolitical",
            ConflictDomain::Interpersonal => "Interpersonal/Social",
            ConflictDomain::Media => "Media/Propaganda",
            ConflictDomain::Professional => "Professional/Corporate",
        }
    }

    /// Short lowercase key, convenient on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ConflictDomain::International => "international",
            ConflictDomain::Interpersonal => "interpersonal",
            ConflictDomain::Media => "media",
            ConflictDomain::Professional => "professional",
        }
    }

    /// Guidance on when to pick this domain
    pub fn description(&self) -> &'static str {
        match self {
            ConflictDomain::International => {
                "Use for high-level diplomatic statements, military posturing, or official propaganda."
            }
            ConflictDomain::Interpersonal => {
                "Use for family disputes, friendships, or heated community discussions."
            }
            ConflictDomain::Media => {
                "Use for news clips, viral social media posts, or political rallies."
            }
            ConflictDomain::Professional => {
                "Use for high-stakes business negotiations or workplace conflict."
            }
        }
    }

    /// Parse a domain from its label or short key, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::ALL.into_iter().find(|d| {
            d.label().eq_ignore_ascii_case(needle) || d.key().eq_ignore_ascii_case(needle)
        })
    }
}

impl fmt::Display for ConflictDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ConflictDomain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::UnknownDomain(s.to_string()))
    }
}

impl TryFrom<String> for ConflictDomain {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
