//! Reverse geocoding via the OpenCage API.
//!
//! The service only needs one thing from the provider: a city name for a
//! lat/lon pair. Everything else in the response is ignored. Failures are
//! reported to the caller, which swallows them — a missing city must never
//! fail a location submission.

use async_trait::async_trait;
use thiserror::Error;

/// Default OpenCage endpoint.
pub const OPENCAGE_ENDPOINT: &str = "https://api.opencagedata.com/geocode/v1/json";

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("response parse failed: {0}")]
    Parse(String),
}

/// Resolves a lat/lon pair to a city name.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns `Ok(None)` when the provider has no city for the coordinates.
    async fn resolve_city(&self, lat: f64, lon: f64) -> Result<Option<String>, GeocodeError>;
}

/// Geocoder backed by the OpenCage forward/reverse geocoding API.
pub struct OpenCageGeocoder {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl OpenCageGeocoder {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, OPENCAGE_ENDPOINT.to_string())
    }

    /// Override the endpoint (tests point this at a local stub server).
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
        }
    }
}

#[async_trait]
impl Geocoder for OpenCageGeocoder {
    async fn resolve_city(&self, lat: f64, lon: f64) -> Result<Option<String>, GeocodeError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", format!("{},{}", lat, lon)),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(GeocodeError::Status(resp.status().as_u16()));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))?;

        Ok(extract_city(&body))
    }
}

/// Geocoder used when no OpenCage API key is configured: every lookup
/// resolves to no city, so location submissions still succeed.
pub struct DisabledGeocoder;

#[async_trait]
impl Geocoder for DisabledGeocoder {
    async fn resolve_city(&self, _lat: f64, _lon: f64) -> Result<Option<String>, GeocodeError> {
        Ok(None)
    }
}

/// Pull a city name out of an OpenCage response body.
///
/// Takes `city`, falling back to `town` then `village`, from the first
/// result's `components` object.
pub fn extract_city(body: &serde_json::Value) -> Option<String> {
    let components = body.get("results")?.get(0)?.get("components")?;
    for key in ["city", "town", "village"] {
        if let Some(name) = components.get(key).and_then(|v| v.as_str()) {
            return Some(name.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_city_prefers_city() {
        let body = json!({
            "results": [{"components": {"city": "Pune", "town": "Ignored"}}]
        });
        assert_eq!(extract_city(&body), Some("Pune".to_string()));
    }

    #[test]
    fn extract_city_falls_back_to_town_then_village() {
        let town = json!({"results": [{"components": {"town": "Alibag"}}]});
        assert_eq!(extract_city(&town), Some("Alibag".to_string()));

        let village = json!({"results": [{"components": {"village": "Malana"}}]});
        assert_eq!(extract_city(&village), Some("Malana".to_string()));
    }

    #[test]
    fn extract_city_handles_missing_pieces() {
        assert_eq!(extract_city(&json!({})), None);
        assert_eq!(extract_city(&json!({"results": []})), None);
        assert_eq!(extract_city(&json!({"results": [{}]})), None);
        assert_eq!(
            extract_city(&json!({"results": [{"components": {"country": "India"}}]})),
            None
        );
    }

    #[tokio::test]
    async fn disabled_geocoder_resolves_nothing() {
        let city = DisabledGeocoder.resolve_city(18.52, 73.85).await.unwrap();
        assert_eq!(city, None);
    }
}
