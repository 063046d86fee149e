use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use landing_core::ServiceError;

use crate::api::AppState;
use crate::model::Lead;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/get/all", get(get_all_leads))
        .route("/api/get/date", get(get_leads_by_date))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateParams {
    created_date: String,
}

/// Handle GET /api/get/all.
async fn get_all_leads(State(svc): State<AppState>) -> Result<Json<Vec<Lead>>, ServiceError> {
    let leads = svc.list_leads().map_err(ServiceError::from)?;
    Ok(Json(leads))
}

/// Handle GET /api/get/date?createdDate=1-1-2025.
async fn get_leads_by_date(
    State(svc): State<AppState>,
    Query(params): Query<DateParams>,
) -> Result<Json<Vec<Lead>>, ServiceError> {
    let leads = svc
        .list_leads_by_date(&params.created_date)
        .map_err(ServiceError::from)?;
    Ok(Json(leads))
}
