use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use landing_core::ServiceError;

use crate::api::AppState;
use crate::model::{CreateLead, Lead};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/leads", post(submit_lead))
}

/// Handle POST /api/leads.
async fn submit_lead(
    State(svc): State<AppState>,
    Json(input): Json<CreateLead>,
) -> Result<(axum::http::StatusCode, Json<Lead>), ServiceError> {
    let lead = svc.create_lead(input).map_err(ServiceError::from)?;
    Ok((axum::http::StatusCode::CREATED, Json(lead)))
}
