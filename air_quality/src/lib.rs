#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod countries;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod service;

pub use errors::Error;
pub use service::AirQualityService;
