//! Command-line interface for runtime-probe
//!
//! Provides argument parsing and subcommand handling for the runtime-probe binary.

use crate::config::{Config, RuntimeConfig};
use crate::error::AppResult;
use crate::metrics::Metrics;
use crate::runtime::{EvaluationVersionGate, ModelDescriptor, VersionProbe};
use clap::{Parser, Subcommand};
use std::path::Path;

/// Default config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "runtime-probe.toml";

/// Best-effort version probe for a locally hosted model runtime
#[derive(Parser, Debug)]
#[command(name = "runtime-probe")]
#[command(version)]
#[command(about = "Best-effort version probe for a locally hosted model runtime")]
#[command(
    long_about = "runtime-probe asks a local model runtime which version it is running, \
    printing 'unknown' when the runtime is down or does not report a version."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the runtime version, or "unknown"
    Version {
        /// Override the runtime base URL from the config file
        #[arg(long)]
        base_url: Option<String>,

        /// Treat the model as externally hosted (skips the probe)
        #[arg(long)]
        external: bool,

        /// Print the probe outcome and reason instead of just the version
        #[arg(long)]
        detailed: bool,
    },
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Text printed when no version could be determined
pub const UNKNOWN_VERSION: &str = "unknown";

/// Detailed output for an externally hosted model
pub const SKIPPED_EXTERNAL: &str = "skipped: externally hosted model";

/// Load the config named on the command line, or fall back to defaults
///
/// An explicitly named file must exist. Without `--config`, the default
/// path is used when present and built-in defaults otherwise.
pub fn load_config(path: Option<&str>) -> AppResult<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::from_file(DEFAULT_CONFIG_PATH),
        None => Ok(Config::default()),
    }
}

/// Run the `version` subcommand and return the text to print
///
/// With `external`, the model is treated as remotely hosted and the runtime
/// is never contacted. Probe failures are not errors; they print as
/// `unknown`. With `detailed`, the outcome and its reason are printed
/// instead, followed by the probe counters in Prometheus text format.
pub async fn run_version(
    runtime: &RuntimeConfig,
    external: bool,
    detailed: bool,
) -> AppResult<String> {
    let probe = VersionProbe::with_timeouts(runtime.endpoint()?, runtime.timeouts())?;
    let model = ModelDescriptor {
        name: "cli".to_string(),
        is_external: external,
    };

    if !detailed {
        let gate = EvaluationVersionGate::new(probe);
        return Ok(gate
            .version_for(&model)
            .await
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string()));
    }

    let metrics = Metrics::new()?;
    let gate = EvaluationVersionGate::new(probe.with_metrics(metrics.clone()));
    let line = match gate.outcome_for(&model).await {
        Some(outcome) => outcome.to_string(),
        None => SKIPPED_EXTERNAL.to_string(),
    };

    Ok(format!("{}\n\n{}", line, metrics.gather()?))
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# runtime-probe Configuration
# ===========================

# ─────────────────────────────────────────────────────────────────────────────
# RUNTIME
# ─────────────────────────────────────────────────────────────────────────────

[runtime]
# Base URL of the local model runtime (http:// or https://)
# A bare "host:port" is read as http://host:port
base_url = "http://localhost:11434"

# Seconds to wait for the "list models" liveness check (1-60)
liveness_timeout_seconds = 5

# Seconds to wait for GET /api/version (1-60)
version_timeout_seconds = 2

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
# RUST_LOG overrides this when set
log_level = "info"
"#
}
