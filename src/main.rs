//! runtime-probe binary
//!
//! Prints the version of the local model runtime, or generates a config template.

use clap::Parser;
use runtime_probe::cli::{self, Cli, Command};
use runtime_probe::error::AppError;
use runtime_probe::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    match args.command {
        Command::Config { output } => {
            let template = cli::generate_config_template();
            match output {
                Some(path) => {
                    std::fs::write(&path, template).map_err(|source| AppError::Output {
                        path: path.clone(),
                        source,
                    })?;
                    eprintln!("Wrote configuration template to {}", path);
                }
                None => print!("{}", template),
            }
        }
        Command::Version {
            base_url,
            external,
            detailed,
        } => {
            let config = cli::load_config(args.config.as_deref())?;
            telemetry::init(&config.observability.log_level);

            let runtime = match base_url {
                Some(url) => config.runtime.clone().with_base_url(url),
                None => config.runtime.clone(),
            };

            tracing::debug!(
                base_url = runtime.base_url(),
                external,
                "Probing runtime version"
            );

            let output = cli::run_version(&runtime, external, detailed).await?;
            println!("{}", output.trim_end());
        }
    }

    Ok(())
}
