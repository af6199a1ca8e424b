//! Result of a single version probe

use std::fmt;

/// What a probe learned about the runtime
///
/// Callers that only care whether a version is known use `into_version()`;
/// callers that want to tell "runtime down" from "runtime up, version
/// unknown" match on the variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOutcome {
    /// The liveness check failed; no version request was made
    Unreachable { reason: String },
    /// The runtime answered the liveness check but not with a version
    NoVersion { reason: String },
    /// The version endpoint reported this version
    Version(String),
}

impl VersionOutcome {
    /// Borrow the version string, if one was determined
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Version(v) => Some(v),
            _ => None,
        }
    }

    /// Collapse into the plain present/absent view
    pub fn into_version(self) -> Option<String> {
        match self {
            Self::Version(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the runtime answered the liveness check
    pub fn is_reachable(&self) -> bool {
        !matches!(self, Self::Unreachable { .. })
    }

    /// Stable label, used for metrics and CLI output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "unreachable",
            Self::NoVersion { .. } => "no_version",
            Self::Version(_) => "version",
        }
    }
}

impl fmt::Display for VersionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable { reason } => write!(f, "unreachable: {}", reason),
            Self::NoVersion { reason } => write!(f, "no_version: {}", reason),
            Self::Version(v) => write!(f, "version: {}", v),
        }
    }
}
