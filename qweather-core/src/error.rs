use thiserror::Error;

/// Failure kinds for the lookup pipeline.
///
/// Variants map one-to-one onto the distinct causes a query can fail for,
/// so each path stays separately testable. None of the `Display` text here
/// is shown to end users as-is; [`crate::report::WeatherReporter`] renders
/// the user-facing message at the presentation boundary.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// City input was empty or whitespace-only; nothing was sent anywhere.
    #[error("city name is blank")]
    BlankCity,

    /// Geocoding produced no usable location for the city.
    #[error("no location found for city `{city}`")]
    CityNotFound { city: String },

    /// Provider envelope carried a non-success status code.
    #[error("provider returned status code {code}")]
    ProviderStatus { code: String },

    /// Connection or HTTP-level failure beneath the provider request.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not a valid gzip stream.
    #[error("gzip decompression failed: {0}")]
    Decompress(#[source] std::io::Error),

    /// Decompressed body was not the JSON document we expect.
    #[error("invalid provider JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Success envelope arrived without its data object.
    #[error("provider response is missing the `{0}` payload")]
    MissingPayload(&'static str),
}

pub type Result<T> = std::result::Result<T, WeatherError>;
