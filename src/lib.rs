//! runtime-probe - best-effort version probe for a local model runtime
//!
//! This library asks a locally running model-serving daemon for its version
//! so evaluation records can note which runtime produced them. Every failure
//! degrades to "unknown"; nothing is cached.
//!
//! ```no_run
//! use runtime_probe::runtime::{EvaluationVersionGate, ModelDescriptor, RuntimeEndpoint, VersionProbe};
//!
//! # async fn demo() -> runtime_probe::error::AppResult<()> {
//! let endpoint = RuntimeEndpoint::new("http://localhost:11434")?;
//! let gate = EvaluationVersionGate::new(VersionProbe::new(endpoint)?);
//! let version = gate.version_for(&ModelDescriptor::local("llama3:8b")).await;
//! println!("{}", version.as_deref().unwrap_or("unknown"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod runtime;
pub mod telemetry;
