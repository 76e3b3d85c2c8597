use crate::error::Result;
use crate::model::{LocationId, WeatherAlert, WeatherNow};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod qweather;

/// Envelope status sentinel for a successful provider response. This is a
/// field inside the JSON body, not the HTTP status.
pub const STATUS_OK: &str = "200";

/// The resolver/fetcher seam of the lookup pipeline.
///
/// [`crate::report::WeatherReporter`] drives these three operations in a
/// fixed sequence; [`qweather::QWeatherClient`] is the production
/// implementation. The trait exists so every failure path of the reporter
/// can be exercised with scripted fakes.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Resolve a free-text city name to the provider's location id.
    ///
    /// `Ok(None)` means the provider answered but had no usable location
    /// (non-success envelope code, or an empty `location` list); that is an
    /// expected outcome, not an error. Transport and decoding failures are
    /// returned as errors so the caller can log the distinct cause.
    async fn resolve_city(&self, city: &str) -> Result<Option<LocationId>>;

    /// Fetch the realtime observation for a resolved location.
    async fn current_weather(&self, location: &LocationId) -> Result<WeatherNow>;

    /// Fetch the active warnings for a resolved location; the list is
    /// empty when none are in effect.
    async fn active_warnings(&self, location: &LocationId) -> Result<Vec<WeatherAlert>>;
}
