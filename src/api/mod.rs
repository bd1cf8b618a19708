//! REST API endpoints.
//!
//! Axum-based HTTP API exposing team metrics, player metrics, team
//! comparisons and match predictions.

pub mod cache;
pub mod routes;
pub mod state;

use std::future::Future;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::engine::EngineError;
use crate::models::TeamId;
use cache::ResponseCache;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound(what) => ApiError::NotFound(what),
            EngineError::UpstreamUnavailable(msg) => ApiError::BadGateway(msg),
            EngineError::InvalidRequest(msg) => ApiError::BadRequest(msg),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Parse a team id from a path segment or query parameter.
pub fn parse_team_id(raw: &str, field: &str) -> Result<TeamId, ApiError> {
    raw.trim().parse().map_err(|_| {
        ApiError::BadRequest(format!("{} must be a numeric team id, got {:?}", field, raw))
    })
}

/// Required, non-blank query parameter.
pub fn required_param<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!("missing query parameter {}", field))),
    }
}

/// Serve `key` from the cache, or compute, cache and return it.
pub async fn cached_json<T, F, Fut>(
    cache: &ResponseCache,
    key: String,
    compute: F,
) -> Result<Json<Value>, ApiError>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, EngineError>>,
{
    if let Some(hit) = cache.get(&key).await {
        return Ok(Json(hit));
    }

    let value = serde_json::to_value(compute().await?)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    cache.insert(key, value.clone()).await;
    Ok(Json(value))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                warn!("Invalid CORS origin {:?}, allowing any origin", origin);
                AllowOrigin::from(Any)
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/teams/compare", get(routes::teams::compare_teams))
        .route("/api/teams/:id/metrics", get(routes::teams::team_metrics))
        .route("/api/players/:id/metrics", get(routes::players::player_metrics))
        .route("/api/predictions", get(routes::predictions::predict_match))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn error_body(err: ApiError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_engine_errors_map_to_status() {
        let (status, json) =
            error_body(EngineError::UpstreamUnavailable("HTTP 503".to_string()).into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "UPSTREAM_UNAVAILABLE");

        let (status, _) = error_body(EngineError::NotFound("team 9".to_string()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) =
            error_body(EngineError::InvalidRequest("same team".to_string()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "Bad request: same team");
    }

    #[test]
    fn test_parse_team_id() {
        assert_eq!(parse_team_id(" 57 ", "id").unwrap(), 57);
        assert!(matches!(parse_team_id("abc", "id"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_team_id("-1", "id"), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_required_param() {
        assert_eq!(required_param(&Some(" Arsenal ".to_string()), "homeTeam").unwrap(), "Arsenal");
        assert!(required_param(&Some("  ".to_string()), "homeTeam").is_err());
        assert!(required_param(&None, "homeTeam").is_err());
    }

    #[tokio::test]
    async fn test_cached_json_only_caches_success() {
        let cache = ResponseCache::new(std::time::Duration::from_secs(60));

        let failed = cached_json(&cache, "team:1".to_string(), || async {
            Err::<u32, _>(EngineError::UpstreamUnavailable("down".to_string()))
        })
        .await;
        assert!(failed.is_err());
        assert!(cache.is_empty().await);

        let Json(value) = cached_json(&cache, "team:1".to_string(), || async { Ok(7u32) })
            .await
            .unwrap();
        assert_eq!(value, 7);

        let Json(hit) = cached_json(&cache, "team:1".to_string(), || async {
            Ok::<u32, EngineError>(8)
        })
        .await
        .unwrap();
        assert_eq!(hit, 7);
    }
}
