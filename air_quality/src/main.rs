use std::{process::ExitCode, time::Duration};

use air_quality::{
    cli::{commands::Cli, params::load_settings},
    errors::Error,
    service::{AirQualityService, with_deadline},
};
use chrono::Utc;
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(payload) => {
            println!("{payload}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            match serde_json::to_string(&e.report()) {
                Ok(json) => println!("{json}"),
                Err(encode) => eprintln!("failed to encode error report: {encode}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<Value, Error> {
    let settings = load_settings(cli.config.as_deref())?;
    let service = AirQualityService::from_settings(settings)?;

    let deadline = Duration::from_secs(cli.timeout_secs);
    with_deadline(deadline, cli.command.execute(&service, Utc::now())).await
}
