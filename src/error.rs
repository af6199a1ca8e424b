//! Error types for runtime-probe
//!
//! `AppError` covers setup failures that are returned to the caller.
//! `ProbeError` describes why a single runtime request failed; it is only
//! ever logged, never surfaced through the probe API.

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file '{path}': {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in '{path}': {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error("Invalid runtime endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Failed to write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;

/// Cause of a failed request against the runtime
#[derive(Error, Debug)]
pub enum ProbeError {
    /// `cause` is the full source chain of `source`, so the OS-level reason
    /// (connection refused, DNS failure, TLS) reaches the log
    #[error("request to {url} failed: {cause}")]
    Connect {
        url: String,
        cause: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout { url: String, timeout_ms: u128 },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("response from {url} has no string 'version' field")]
    MissingVersion { url: String },
}

impl ProbeError {
    /// Classify a transport error, separating timeouts from other failures
    pub fn from_transport(url: &str, timeout: std::time::Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis(),
            }
        } else {
            Self::Connect {
                url: url.to_string(),
                cause: error_chain(&source),
                source,
            }
        }
    }
}

/// Render an error and all of its sources as `outer: inner: innermost`
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();

    while let Some(source) = current {
        let message = source.to_string();
        // Some wrappers repeat their source's text verbatim
        if !rendered.ends_with(&message) {
            rendered.push_str(": ");
            rendered.push_str(&message);
        }
        current = source.source();
    }

    rendered
}
