//! Launch countdown endpoint.
//!
//! The campaign end is a fixed wall-clock instant shared with the
//! frontend timer: a hardcoded start plus a ten-day window. Every
//! response is computed against that same end, so all visitors see the
//! same remaining time.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Campaign start, Unix epoch milliseconds (2025-09-01T00:00:00Z).
const FIXED_START_MS: i64 = 1_756_684_800_000;

/// Campaign window length.
const COUNTDOWN_DURATION_SECS: i64 = 10 * 24 * 60 * 60;

/// Campaign end, Unix epoch milliseconds.
pub const END_TIME_MS: i64 = FIXED_START_MS + COUNTDOWN_DURATION_SECS * 1_000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownResponse {
    /// Whole seconds until the campaign end, 0 once it has passed.
    pub remaining_seconds: i64,

    /// Campaign end, Unix epoch milliseconds.
    pub end_time: i64,
}

/// Remaining time at a given instant (epoch milliseconds).
pub fn remaining_at(now_ms: i64) -> CountdownResponse {
    CountdownResponse {
        remaining_seconds: ((END_TIME_MS - now_ms) / 1_000).max(0),
        end_time: END_TIME_MS,
    }
}

/// Handle GET /countdown.
pub async fn countdown() -> Json<CountdownResponse> {
    Json(remaining_at(Utc::now().timestamp_millis()))
}
