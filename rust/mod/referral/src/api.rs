use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use landing_core::ServiceError;

use crate::service::ReferralService;

/// Router state: the service plus the shared secret for the write path.
pub struct ReferralState {
    pub svc: Arc<ReferralService>,
    pub api_key: String,
}

pub type AppState = Arc<ReferralState>;

/// Build the referral API router.
pub fn build_router(svc: Arc<ReferralService>, api_key: String) -> Router {
    Router::new()
        .route(
            "/api/referral/{code}",
            post(track_referral).get(get_referral_hit),
        )
        .with_state(Arc::new(ReferralState { svc, api_key }))
}

/// Handle POST /api/referral/{code}.
///
/// Requires the static `X-API-KEY` header. Responses use the
/// `{success, message, ...}` envelope the redirect page expects.
async fn track_referral(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, ServiceError> {
    if !api_key_matches(&headers, &state.api_key) {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "message": "Unauthorized: Missing or invalid X-API-KEY",
                "data": null,
            })),
        )
            .into_response());
    }

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok());
    let ip = caller_ip(&headers, addr);

    state
        .svc
        .track(&code, user_agent, Some(&ip))
        .map_err(ServiceError::from)?;

    Ok(Json(json!({
        "success": true,
        "message": "Referral tracked",
        "code": code,
    }))
    .into_response())
}

/// Handle GET /api/referral/{code} — the most recent hit for the code.
async fn get_referral_hit(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, ServiceError> {
    match state.svc.latest_hit(&code).map_err(ServiceError::from)? {
        Some(hit) => Ok(Json(json!({
            "success": true,
            "message": "Referral hit found",
            "data": hit,
        }))
        .into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "message": format!("No referral hit found for code: {}", code),
                "data": null,
            })),
        )
            .into_response()),
    }
}

fn api_key_matches(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .is_some_and(|key| !key.is_empty() && key == expected)
}

/// Caller IP: first X-Forwarded-For hop when present (the server sits
/// behind a reverse proxy in production), else the socket peer address.
fn caller_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| addr.ip().to_string())
}
