//! Decides whether a model's evaluation gets a runtime version at all
//!
//! Externally hosted models never touch the local runtime, so they are
//! answered with `None` without probing.

use super::endpoint::RuntimeEndpoint;
use super::model::HostedModel;
use super::outcome::VersionOutcome;
use super::probe::{VersionProbe, VersionSource};

/// Version lookup for evaluation records
pub struct EvaluationVersionGate<S> {
    source: S,
}

impl<S: VersionSource> EvaluationVersionGate<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Full probe outcome for `model`, or `None` when the model is external
    /// and the runtime was not contacted
    pub async fn outcome_for<M: HostedModel + ?Sized>(&self, model: &M) -> Option<VersionOutcome> {
        if model.is_external() {
            return None;
        }

        Some(self.source.probe_outcome().await)
    }

    /// Runtime version to record for an evaluation of `model`
    ///
    /// `None` for external models (no probe is made) and whenever the local
    /// runtime's version cannot be determined.
    pub async fn version_for<M: HostedModel + ?Sized>(&self, model: &M) -> Option<String> {
        self.outcome_for(model)
            .await
            .and_then(VersionOutcome::into_version)
    }
}

/// One-shot form of `EvaluationVersionGate::version_for` against `endpoint`
pub async fn evaluation_runtime_version<M: HostedModel + ?Sized>(
    endpoint: &RuntimeEndpoint,
    model: &M,
) -> Option<String> {
    let probe = match VersionProbe::new(endpoint.clone()) {
        Ok(probe) => probe,
        Err(e) => {
            tracing::warn!(endpoint = %endpoint, error = %e, "Could not create runtime probe");
            return None;
        }
    };

    EvaluationVersionGate::new(probe).version_for(model).await
}
