//! Response body decoding: gzip inflation followed by JSON parsing.
//!
//! Every QWeather endpoint answers with a gzip-compressed UTF-8 JSON
//! document regardless of request headers, so the client never reads a
//! body except through this module. Decoding is all-or-nothing: a
//! truncated or corrupt stream fails as a whole, there are no partial
//! results.

use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use std::io::Read;

use crate::error::{Result, WeatherError};

/// Inflate a gzip-compressed body into its raw bytes.
///
/// Fails with [`WeatherError::Decompress`] when the input is not a valid
/// gzip stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(WeatherError::Decompress)?;
    Ok(out)
}

/// Inflate a gzip-compressed body and parse the embedded JSON document.
///
/// Fails with [`WeatherError::Decompress`] for invalid gzip and
/// [`WeatherError::Json`] when the inflated text is not the expected
/// document.
pub fn decode_json<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    let bytes = decompress(data)?;
    Ok(serde_json::from_slice(&bytes)?)
}
