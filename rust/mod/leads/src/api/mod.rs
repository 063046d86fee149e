mod admin;
mod leads;
mod location;

use std::sync::Arc;

use axum::Router;

use crate::service::LeadsService;

/// Shared application state.
pub type AppState = Arc<LeadsService>;

/// Build the leads API router.
///
/// Paths are absolute (`/api/leads`, `/api/location`, `/api/get/...`)
/// because the frontend's URL layout is fixed.
pub fn build_router(svc: Arc<LeadsService>) -> Router {
    Router::new()
        .merge(leads::routes())
        .merge(location::routes())
        .merge(admin::routes())
        .with_state(svc)
}
