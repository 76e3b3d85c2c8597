//! Core library for the `qweather` CLI.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The QWeather HTTP client behind the [`provider::WeatherSource`] seam
//! - The gzip/JSON response decoder
//! - Report rendering for realtime weather and weather warnings
//!
//! It is used by `qweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;

pub use config::Config;
pub use error::{Result, WeatherError};
pub use model::{LocationId, WeatherAlert, WeatherNow};
pub use provider::{WeatherSource, qweather::QWeatherClient};
pub use report::WeatherReporter;
