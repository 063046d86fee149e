use serde::{Deserialize, Serialize};

/// One approximate browser location per session, created when the user
/// grants geolocation permission. Looked up later to annotate a Lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLocation {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// City resolved by reverse geocoding; absent when the lookup failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Browser session id this location belongs to.
    pub session_id: String,

    pub lat: f64,
    pub lon: f64,

    /// Browser-reported accuracy in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Input for the location submission endpoint.
///
/// `source` and `ts` come from the browser payload and are accepted but
/// not stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    pub session_id: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub source: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub ts: Option<f64>,
}

/// Response body for the location submission endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub city: Option<String>,
    pub session_id: String,
    pub lat: f64,
    pub lon: f64,
    pub accuracy: Option<f64>,
}

impl From<UserLocation> for LocationResponse {
    fn from(loc: UserLocation) -> Self {
        Self {
            city: loc.city,
            session_id: loc.session_id,
            lat: loc.lat,
            lon: loc.lon,
            accuracy: loc.accuracy,
        }
    }
}
