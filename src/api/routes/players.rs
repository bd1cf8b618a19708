use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::{cached_json, required_param, ApiError};

#[derive(Debug, Deserialize)]
pub struct PlayerMetricsParams {
    pub name: Option<String>,
}

pub async fn player_metrics(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PlayerMetricsParams>,
) -> Result<Json<Value>, ApiError> {
    let player_id = id.trim().to_string();
    if player_id.is_empty() {
        return Err(ApiError::BadRequest("player id must not be empty".to_string()));
    }
    let name = required_param(&params.name, "name")?;

    let key = format!("player:{}:{}", player_id, name.to_lowercase());
    cached_json(&state.cache, key, || {
        state.engine.compute_player_advanced_metrics(&player_id, name)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{get_json, test_state};
    use crate::api::build_router;
    use crate::models::{PlayerStatRow, PlayerStatistics};
    use crate::provider::StaticProvider;
    use axum::http::StatusCode;
    use std::sync::Arc;
    use std::time::Duration;

    fn provider() -> StaticProvider {
        StaticProvider {
            players: vec![PlayerStatistics {
                player_id: "4096".to_string(),
                player_name: "Bukayo Saka".to_string(),
                rows: vec![PlayerStatRow {
                    competition: "Premier League".to_string(),
                    ..Default::default()
                }],
                total_average: Some(PlayerStatRow {
                    competition: "Total".to_string(),
                    appearances: "10(2)".to_string(),
                    minutes: "900".to_string(),
                    goals: "9".to_string(),
                    assists: "-".to_string(),
                    ..Default::default()
                }),
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_player_metrics() {
        let state = test_state(Arc::new(provider()), Duration::ZERO);
        let (status, json) = get_json(
            build_router(state),
            "/api/players/4096/metrics?name=Bukayo%20Saka",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["playerName"], "Bukayo Saka");
        assert_eq!(json["totalMatches"], 10);
        assert_eq!(json["goalsPer90"], 0.9);
        assert_eq!(json["minutesPerGoal"], 100.0);
        assert!(json.get("minutesPerAssist").is_none());
        assert_eq!(json["competitions"][0], "Premier League");
    }

    #[tokio::test]
    async fn test_player_metrics_requires_name() {
        let state = test_state(Arc::new(provider()), Duration::ZERO);
        let (status, json) = get_json(build_router(state), "/api/players/4096/metrics").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_player_metrics_unknown_player() {
        let state = test_state(Arc::new(provider()), Duration::ZERO);
        let (status, _) =
            get_json(build_router(state), "/api/players/1/metrics?name=Nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_player_metrics_cache_key_ignores_case() {
        let provider = Arc::new(provider());
        let state = test_state(provider.clone(), Duration::from_secs(60));

        get_json(build_router(state.clone()), "/api/players/4096/metrics?name=Bukayo%20Saka").await;
        get_json(build_router(state.clone()), "/api/players/4096/metrics?name=bukayo%20saka").await;

        assert_eq!(provider.call_count(), 1);
        assert_eq!(state.cache.len().await, 1);
    }
}
