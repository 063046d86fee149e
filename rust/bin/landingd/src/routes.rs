use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use landing_core::{Module, ServiceError};

use crate::config::{CorsConfig, ServerConfig};
use crate::countdown;

/// Admin read endpoints live under this prefix and require the API key.
const ADMIN_PATH_PREFIX: &str = "/api/get";

struct AdminGate {
    api_key: String,
}

/// Build the full application router: system endpoints plus every
/// module's routes, wrapped in the admin gate and CORS layers.
pub fn build_router(modules: &[Box<dyn Module>], config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/countdown", get(countdown::countdown));

    for module in modules {
        info!(module = module.name(), "mounting module routes");
        app = app.merge(module.routes());
    }

    let gate = Arc::new(AdminGate {
        api_key: config.security.api_key.clone(),
    });

    app.layer(middleware::from_fn_with_state(gate, admin_guard))
        .layer(cors_layer(&config.cors))
}

/// Require the `X-API-KEY` header on admin read endpoints. All other
/// paths pass through untouched.
async fn admin_guard(
    State(gate): State<Arc<AdminGate>>,
    req: Request,
    next: Next,
) -> Response {
    if !req.uri().path().starts_with(ADMIN_PATH_PREFIX) {
        return next.run(req).await;
    }

    let presented = req
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    if presented.is_empty() || presented != gate.api_key {
        return ServiceError::Unauthorized("missing or invalid X-API-KEY".to_string())
            .into_response();
    }

    next.run(req).await
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-api-key")]);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin, "skipping invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<serde_json::Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::SocketAddr;

    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::Extension;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use landing_sql::SqliteStore;
    use leads::geocode::DisabledGeocoder;
    use leads::LeadsModule;
    use referral::ReferralModule;

    const KEY: &str = "test-admin-key";

    fn test_app() -> Router {
        let sql: Arc<dyn landing_sql::SQLStore> =
            Arc::new(SqliteStore::open_in_memory().unwrap());

        let leads = LeadsModule::new(sql.clone(), Arc::new(DisabledGeocoder)).unwrap();
        let referral = ReferralModule::new(sql, KEY.to_string()).unwrap();
        let modules: Vec<Box<dyn Module>> = vec![Box::new(leads), Box::new(referral)];

        let mut config = ServerConfig::default();
        config.security.api_key = KEY.to_string();

        let addr = SocketAddr::from(([127, 0, 0, 1], 4000));
        build_router(&modules, &config).layer(Extension(ConnectInfo(addr)))
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_and_version() {
        let app = test_app();

        let resp = app
            .clone()
            .oneshot(HttpRequest::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(HttpRequest::builder().uri("/version").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["name"], "landingd");
    }

    #[tokio::test]
    async fn countdown_is_public() {
        let app = test_app();

        let resp = app
            .oneshot(HttpRequest::builder().uri("/countdown").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["endTime"], countdown::END_TIME_MS);
        assert!(body["remainingSeconds"].as_i64().unwrap() >= 0);
    }

    #[tokio::test]
    async fn admin_reads_require_api_key() {
        let app = test_app();

        let resp = app
            .clone()
            .oneshot(HttpRequest::builder().uri("/api/get/all").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(body["code"], "UNAUTHENTICATED");

        let resp = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/get/all")
                    .header("x-api-key", "wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/get/all")
                    .header("x-api-key", KEY)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn lead_submission_is_public() {
        let app = test_app();

        let payload = json!({
            "name": "Ada Lovelace",
            "mobile": "+39331234567",
            "email": "ada@example.com",
        });
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/api/leads")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = body_json(resp).await;
        assert_eq!(body["email"], "ada@example.com");
    }
}
