use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::{cached_json, parse_team_id, required_param, ApiError};

// ── Team Metrics ────────────────────────────────────────────────

pub async fn team_metrics(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let team_id = parse_team_id(&id, "id")?;

    cached_json(&state.cache, format!("team:{}", team_id), || {
        state.engine.compute_team_advanced_metrics(team_id)
    })
    .await
}

// ── Team Comparison ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub team1: Option<String>,
    pub team2: Option<String>,
}

pub async fn compare_teams(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<Value>, ApiError> {
    let team1 = parse_team_id(required_param(&params.team1, "team1")?, "team1")?;
    let team2 = parse_team_id(required_param(&params.team2, "team2")?, "team2")?;

    cached_json(&state.cache, format!("compare:{}:{}", team1, team2), || {
        state.engine.compare_teams(team1, team2)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{get_json, test_state};
    use crate::api::build_router;
    use crate::calculate::team::tests::{fixture, scenario_a, TEAM};
    use crate::models::TeamRef;
    use crate::provider::StaticProvider;
    use axum::http::StatusCode;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    fn provider() -> StaticProvider {
        let mut matches = HashMap::new();
        matches.insert(TEAM, scenario_a());
        matches.insert(1, vec![fixture(0, TEAM, 1, 2, 0)]);

        StaticProvider {
            teams: vec![TeamRef::new(TEAM, "Arsenal FC"), TeamRef::new(1, "Team 1")],
            matches,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_team_metrics() {
        let state = test_state(Arc::new(provider()), Duration::ZERO);
        let (status, json) = get_json(build_router(state), "/api/teams/57/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["teamName"], "Arsenal FC");
        assert_eq!(json["season"], "2025/2026");
        assert_eq!(json["matchesPlayed"], 5);
        assert_eq!(json["winRate"], 60.0);
        assert_eq!(json["homePerformance"]["points"], 6);
        assert_eq!(json["recentForm"]["formScore"], 60.0);
    }

    #[tokio::test]
    async fn test_team_metrics_bad_id() {
        let state = test_state(Arc::new(provider()), Duration::ZERO);
        let (status, json) = get_json(build_router(state), "/api/teams/arsenal/metrics").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_team_metrics_unknown_team() {
        let state = test_state(Arc::new(provider()), Duration::ZERO);
        let (status, json) = get_json(build_router(state), "/api/teams/999/metrics").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_team_metrics_upstream_failure() {
        let state = test_state(Arc::new(StaticProvider::failing()), Duration::from_secs(60));
        let (status, json) = get_json(build_router(state.clone()), "/api/teams/57/metrics").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "UPSTREAM_UNAVAILABLE");
        assert!(state.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_team_metrics_cached() {
        let provider = Arc::new(provider());
        let state = test_state(provider.clone(), Duration::from_secs(60));

        let (_, first) = get_json(build_router(state.clone()), "/api/teams/57/metrics").await;
        let calls = provider.call_count();
        let (status, second) = get_json(build_router(state), "/api/teams/57/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(provider.call_count(), calls);
    }

    #[tokio::test]
    async fn test_compare_teams() {
        let state = test_state(Arc::new(provider()), Duration::ZERO);
        let (status, json) =
            get_json(build_router(state), "/api/teams/compare?team1=57&team2=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["team1"]["teamName"], "Arsenal FC");
        assert_eq!(json["team1"]["form"], "LLWWW");
        assert_eq!(json["team2"]["matchesPlayed"], 1);
        assert_eq!(json["headToHead"]["totalMatches"], 1);
        assert_eq!(json["headToHead"]["lastMeetings"][0]["winner"], "Team 57");
    }

    #[tokio::test]
    async fn test_compare_missing_param() {
        let state = test_state(Arc::new(provider()), Duration::ZERO);
        let (status, _) = get_json(build_router(state), "/api/teams/compare?team1=57").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compare_same_team() {
        let state = test_state(Arc::new(provider()), Duration::ZERO);
        let (status, json) =
            get_json(build_router(state), "/api/teams/compare?team1=57&team2=57").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_compare_degrades_when_upstream_down() {
        let state = test_state(Arc::new(StaticProvider::failing()), Duration::ZERO);
        let (status, json) =
            get_json(build_router(state), "/api/teams/compare?team1=57&team2=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["team1"]["matchesPlayed"], 0);
        assert_eq!(json["headToHead"]["totalMatches"], 0);
    }
}
