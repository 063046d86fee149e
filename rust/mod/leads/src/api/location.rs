use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use landing_core::ServiceError;

use crate::api::AppState;
use crate::model::{LocationRequest, LocationResponse};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/location", post(submit_location))
}

/// Handle POST /api/location.
///
/// Geocoding failures are already swallowed by the service, so the only
/// client-visible errors here are validation and storage ones.
async fn submit_location(
    State(svc): State<AppState>,
    Json(input): Json<LocationRequest>,
) -> Result<Json<LocationResponse>, ServiceError> {
    let loc = svc.save_location(input).await.map_err(ServiceError::from)?;
    Ok(Json(loc.into()))
}
