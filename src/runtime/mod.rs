//! Runtime version probing
//!
//! Asks a locally hosted model runtime which version it is running, and
//! decides per model whether asking makes sense at all.

pub mod endpoint;
pub mod gate;
pub mod model;
pub mod outcome;
pub mod probe;

pub use endpoint::RuntimeEndpoint;
pub use gate::{EvaluationVersionGate, evaluation_runtime_version};
pub use model::{HostedModel, ModelDescriptor};
pub use outcome::VersionOutcome;
pub use probe::{ProbeTimeouts, VersionProbe, VersionSource, runtime_version};
