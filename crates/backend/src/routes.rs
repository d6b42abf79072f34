use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::api::handlers;
use crate::system;

/// Largest accepted CSV upload
const IMPORT_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// All HTTP routes of the application
pub fn configure_routes() -> Router {
    Router::new()
        .route("/", get(root))
        // ========================================
        // AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/login", post(system::handlers::auth::login))
        .route("/signup", post(system::handlers::auth::signup))
        .route("/auth/google", post(system::handlers::auth::google_login))
        .route(
            "/auth/google/config",
            get(system::handlers::auth::google_config),
        )
        // Auth routes (protected)
        .route(
            "/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // FMCG DATA ROUTES
        // ========================================
        .nest("/api/fmcg", fmcg_routes())
}

fn fmcg_routes() -> Router {
    let protected = Router::new()
        .route("/records", get(handlers::a001_fmcg_record::list))
        .route("/aggregate", get(handlers::d400_fmcg_trends::aggregate))
        .route(
            "/aggregate-stats",
            get(handlers::d400_fmcg_trends::aggregate_stats),
        )
        .route("/trend", get(handlers::d400_fmcg_trends::trend))
        .route("/market-share", get(handlers::d400_fmcg_trends::market_share))
        .route("/sales-value", get(handlers::d400_fmcg_trends::sales_value))
        .route(
            "/volume-contribution",
            get(handlers::d400_fmcg_trends::volume_contribution),
        )
        .route("/yearly-sales", get(handlers::d400_fmcg_trends::yearly_sales))
        .route_layer(middleware::from_fn(system::auth::middleware::require_auth));

    // UseCase u501: CSV import
    let admin = Router::new()
        .route(
            "/import",
            post(handlers::u501_import_fmcg_csv::import).layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        .route_layer(middleware::from_fn(system::auth::middleware::require_admin));

    Router::new()
        .route("/health", get(handlers::a001_fmcg_record::health))
        .merge(protected)
        .merge(admin)
}

async fn root() -> Json<Value> {
    Json(json!({ "hello": "world" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Option<String>, Value) {
        let response = configure_routes()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let challenge = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, challenge, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_public_routes() {
        let (status, _, body) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "hello": "world" }));

        let (status, _, body) = get_json("/api/fmcg/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_data_routes_require_token() {
        for uri in [
            "/api/fmcg/aggregate?group_by=year",
            "/api/fmcg/trend",
            "/api/fmcg/market-share?group_by=brand",
            "/api/fmcg/records",
            "/me",
        ] {
            let (status, challenge, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(challenge.as_deref(), Some("Bearer"));
            assert_eq!(body, json!({ "detail": "Could not validate credentials" }));
        }
    }
}
