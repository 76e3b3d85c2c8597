use serde::{Deserialize, Serialize};

/// Opaque location token issued by the geocoding endpoint.
///
/// The token has no meaning on this side of the wire; it is only echoed
/// back as the `location` query parameter of the weather endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Realtime observation snapshot, the provider's `now` object.
///
/// Every field is kept as the provider's own string (the QWeather envelope
/// encodes numbers and timestamps as JSON strings) so the rendered report
/// repeats them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherNow {
    /// Condition text, e.g. "晴".
    pub text: String,
    /// Air temperature in °C.
    pub temp: String,
    /// Perceived temperature in °C.
    pub feels_like: String,
    /// Relative humidity percentage.
    pub humidity: String,
    /// Wind direction name, e.g. "东北风".
    pub wind_dir: String,
    /// Wind force on the Beaufort-style scale.
    pub wind_scale: String,
    /// Observation timestamp as reported by the provider.
    pub obs_time: String,
}

/// One active weather warning, an element of the provider's `warning` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlert {
    /// Warning type, e.g. "暴雨".
    pub type_name: String,
    /// Severity level, e.g. "橙色".
    pub level: String,
    /// Full descriptive text of the warning.
    pub text: String,
    /// Publication timestamp as reported by the provider.
    pub pub_time: String,
}
