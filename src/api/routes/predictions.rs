use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::{cached_json, parse_team_id, required_param, ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionParams {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub home_team_id: Option<String>,
    pub away_team_id: Option<String>,
}

pub async fn predict_match(
    State(state): State<AppState>,
    Query(params): Query<PredictionParams>,
) -> Result<Json<Value>, ApiError> {
    let home_team = required_param(&params.home_team, "homeTeam")?;
    let away_team = required_param(&params.away_team, "awayTeam")?;
    let home_id = parse_team_id(
        required_param(&params.home_team_id, "homeTeamId")?,
        "homeTeamId",
    )?;
    let away_id = parse_team_id(
        required_param(&params.away_team_id, "awayTeamId")?,
        "awayTeamId",
    )?;

    let key = format!(
        "predict:{}:{}:{}:{}",
        home_id,
        away_id,
        home_team.to_lowercase(),
        away_team.to_lowercase()
    );
    cached_json(&state.cache, key, || {
        state
            .engine
            .predict_match(home_team, away_team, home_id, away_id)
    })
    .await
}
