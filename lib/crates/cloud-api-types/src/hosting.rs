use std::fmt;

use serde::{Deserialize, Serialize};

/// Hosting model of an application (`hosting.type` in the API).
///
/// Unrecognised models are kept verbatim in `Other` so callers can report
/// them instead of dropping them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HostingType {
    /// Acquia Cloud Enterprise.
    Ace,
    /// Acquia Cloud Platform.
    Acp,
    /// Acquia Cloud Site Factory.
    Acsf,
    Other(String),
}

impl HostingType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ace => "ace",
            Self::Acp => "acp",
            Self::Acsf => "acsf",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for HostingType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ace" => Self::Ace,
            "acp" => Self::Acp,
            "acsf" => Self::Acsf,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for HostingType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<HostingType> for String {
    fn from(hosting: HostingType) -> Self {
        match hosting {
            HostingType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for HostingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
