use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::{errors::Error, service::AirQualityService};

use super::params::raw_request;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a settings file (TOML). Built-in defaults are used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Overall deadline for the whole request, in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize the air-quality history for a location
    Chart {
        /// Latitude in degrees. Leave unset (or 0) for the default location.
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,

        /// Longitude in degrees. Leave unset (or 0) for the default location.
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,

        /// History range: day (hours since local midnight) or week (168 hours)
        #[arg(long, default_value = "day")]
        range: String,

        /// IANA time zone used to find local midnight, e.g. "Europe/Paris"
        #[arg(long)]
        time_zone: Option<String>,
    },

    /// Show the current air-quality conditions for a location
    Current {
        /// Latitude in degrees. Leave unset (or 0) for the default location.
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,

        /// Longitude in degrees. Leave unset (or 0) for the default location.
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,
    },
}

impl Commands {
    /// Runs the command against `service` and returns the JSON payload to print.
    pub async fn execute(
        &self,
        service: &AirQualityService,
        now: DateTime<Utc>,
    ) -> Result<Value, Error> {
        match self {
            Commands::Chart {
                latitude,
                longitude,
                range,
                time_zone,
            } => {
                let raw = raw_request(
                    *latitude,
                    *longitude,
                    Some(range.as_str()),
                    time_zone.as_deref(),
                );
                let outcome = service.chart(&raw, now).await?;
                for correction in &outcome.corrections {
                    tracing::debug!(?correction, "request corrected");
                }
                Ok(serde_json::to_value(&outcome.summary)?)
            }
            Commands::Current {
                latitude,
                longitude,
            } => {
                let raw = raw_request(*latitude, *longitude, None, None);
                let conditions = service.current_conditions(&raw).await?;
                Ok(serde_json::to_value(&conditions)?)
            }
        }
    }
}
