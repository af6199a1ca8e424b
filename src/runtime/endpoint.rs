//! Validated runtime base address

use crate::error::{AppError, AppResult};
use std::fmt;

/// Path of the "list models" call used as the liveness check
pub const LIVENESS_PATH: &str = "/api/tags";

/// Path of the version endpoint
pub const VERSION_PATH: &str = "/api/version";

/// Base address of the runtime, e.g. `http://localhost:11434`
///
/// Always starts with `http://` or `https://` and never ends with `/`, so
/// joined request URLs contain exactly one `//` (the one after the scheme).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEndpoint {
    base_url: String,
}

impl RuntimeEndpoint {
    /// Validate and normalize a base URL
    ///
    /// A bare `host:port` gets `http://`, matching how the runtime's own
    /// client reads its host setting. Any scheme other than `http` or
    /// `https` is rejected.
    pub fn new(base_url: &str) -> AppResult<Self> {
        let raw = base_url.trim();

        let (scheme, rest) = match raw.split_once("://") {
            Some((scheme @ ("http" | "https"), rest)) => (scheme, rest),
            Some(_) => {
                return Err(AppError::InvalidEndpoint {
                    url: base_url.to_string(),
                    reason: "base_url scheme must be 'http' or 'https'".to_string(),
                });
            }
            None => ("http", raw),
        };

        let host = rest.trim_end_matches('/');
        if host.is_empty() {
            return Err(AppError::InvalidEndpoint {
                url: base_url.to_string(),
                reason: "base_url has no host".to_string(),
            });
        }

        Ok(Self {
            base_url: format!("{}://{}", scheme, host),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.base_url
    }

    /// URL of the liveness ("list models") request
    pub fn liveness_url(&self) -> String {
        format!("{}{}", self.base_url, LIVENESS_PATH)
    }

    /// URL of the version request
    pub fn version_url(&self) -> String {
        format!("{}{}", self.base_url, VERSION_PATH)
    }
}

impl fmt::Display for RuntimeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url)
    }
}
