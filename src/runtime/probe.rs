//! Version probe against the runtime's HTTP API
//!
//! A probe is two requests in sequence:
//! 1. `GET /api/tags` ("list models"), only to confirm the runtime is up
//! 2. `GET /api/version`, whose `version` field is the answer
//!
//! Nothing is cached. Every call hits the runtime, and every failure turns
//! into a logged warning plus a `VersionOutcome` without a version.

use super::endpoint::RuntimeEndpoint;
use super::outcome::VersionOutcome;
use crate::error::{AppError, AppResult, ProbeError};
use crate::metrics::Metrics;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Default bound on the liveness request
pub const DEFAULT_LIVENESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound on the version request
pub const DEFAULT_VERSION_TIMEOUT: Duration = Duration::from_secs(2);

/// Per-request time limits for a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimeouts {
    liveness: Duration,
    version: Duration,
}

impl ProbeTimeouts {
    pub fn new(liveness: Duration, version: Duration) -> Self {
        Self { liveness, version }
    }

    pub fn liveness(&self) -> Duration {
        self.liveness
    }

    pub fn version(&self) -> Duration {
        self.version
    }
}

impl Default for ProbeTimeouts {
    fn default() -> Self {
        Self::new(DEFAULT_LIVENESS_TIMEOUT, DEFAULT_VERSION_TIMEOUT)
    }
}

/// Something that can report the runtime version
///
/// `EvaluationVersionGate` depends on this rather than on `VersionProbe` so
/// the network can be swapped out in tests.
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Probe the runtime and describe what was found
    async fn probe_outcome(&self) -> VersionOutcome;

    /// Probe the runtime, keeping only the version string
    async fn runtime_version(&self) -> Option<String> {
        self.probe_outcome().await.into_version()
    }
}

/// Body of `GET /api/tags`
#[derive(Debug, Deserialize)]
struct ModelList {
    models: Vec<serde_json::Value>,
}

/// Probes one runtime endpoint
#[derive(Clone)]
pub struct VersionProbe {
    endpoint: RuntimeEndpoint,
    timeouts: ProbeTimeouts,
    client: reqwest::Client,
    metrics: Option<Metrics>,
}

impl VersionProbe {
    /// Create a probe with default timeouts
    pub fn new(endpoint: RuntimeEndpoint) -> AppResult<Self> {
        Self::with_timeouts(endpoint, ProbeTimeouts::default())
    }

    /// Create a probe with explicit timeouts
    pub fn with_timeouts(endpoint: RuntimeEndpoint, timeouts: ProbeTimeouts) -> AppResult<Self> {
        // Timeouts are set per request, so the client itself has none
        let client = reqwest::Client::builder()
            .build()
            .map_err(AppError::HttpClient)?;

        Ok(Self {
            endpoint,
            timeouts,
            client,
            metrics: None,
        })
    }

    /// Record every probe outcome in `metrics`
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn endpoint(&self) -> &RuntimeEndpoint {
        &self.endpoint
    }

    pub fn timeouts(&self) -> ProbeTimeouts {
        self.timeouts
    }

    /// Confirm the runtime is up by listing its models
    async fn check_liveness(&self) -> Result<usize, ProbeError> {
        let url = self.endpoint.liveness_url();
        let timeout = self.timeouts.liveness;

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_transport(&url, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProbeError::from_transport(&url, timeout, e))?;

        let list: ModelList = serde_json::from_slice(&body).map_err(|e| ProbeError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        Ok(list.models.len())
    }

    /// Ask the version endpoint for the runtime version
    async fn fetch_version(&self) -> Result<String, ProbeError> {
        let url = self.endpoint.version_url();
        let timeout = self.timeouts.version;

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_transport(&url, timeout, e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ProbeError::Status { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProbeError::from_transport(&url, timeout, e))?;

        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| ProbeError::Decode {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !value.is_object() {
            return Err(ProbeError::Decode {
                url,
                reason: "expected a JSON object".to_string(),
            });
        }

        value
            .get("version")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or(ProbeError::MissingVersion { url })
    }

    async fn run(&self) -> VersionOutcome {
        match self.check_liveness().await {
            Ok(model_count) => {
                tracing::debug!(
                    endpoint = %self.endpoint,
                    model_count,
                    "Runtime liveness check succeeded"
                );
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    error = %e,
                    "Could not connect to runtime or determine version"
                );
                return VersionOutcome::Unreachable {
                    reason: e.to_string(),
                };
            }
        }

        match self.fetch_version().await {
            Ok(version) => {
                tracing::debug!(
                    endpoint = %self.endpoint,
                    version = %version,
                    "Runtime version determined"
                );
                VersionOutcome::Version(version)
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    error = %e,
                    "Connected to runtime but could not determine version"
                );
                VersionOutcome::NoVersion {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl VersionSource for VersionProbe {
    async fn probe_outcome(&self) -> VersionOutcome {
        let outcome = self.run().await;

        if let Some(metrics) = &self.metrics {
            if let Err(e) = metrics.record_probe(&outcome) {
                tracing::warn!(
                    error = %e,
                    outcome = outcome.label(),
                    "Failed to record probe metric"
                );
            }
        }

        outcome
    }
}

/// Probe `endpoint` once with default timeouts
///
/// Returns `None` whenever the version cannot be determined, including when
/// the HTTP client cannot be built.
pub async fn runtime_version(endpoint: &RuntimeEndpoint) -> Option<String> {
    match VersionProbe::new(endpoint.clone()) {
        Ok(probe) => probe.runtime_version().await,
        Err(e) => {
            tracing::warn!(endpoint = %endpoint, error = %e, "Could not create runtime probe");
            None
        }
    }
}
