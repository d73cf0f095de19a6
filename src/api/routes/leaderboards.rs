use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::engine::LeaderboardReport;
use crate::models::{LeaderboardEntry, LeaderboardScope, ScoringWarning, UserId};

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub scope: LeaderboardScope,
    pub season: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,
    pub entries: Vec<LeaderboardEntry>,
    pub pagination: PaginationMeta,
    pub warning_count: usize,
    pub warnings: Vec<ScoringWarning>,
    pub computed_at: DateTime<Utc>,
}

impl LeaderboardResponse {
    fn paged(report: LeaderboardReport, params: &LeaderboardParams) -> Self {
        let pagination = Pagination::new(params.page, params.page_size);
        let meta = PaginationMeta::new(&pagination, report.entries.len() as u32);
        let entries = pagination.slice(&report.entries).to_vec();

        Self {
            scope: report.scope,
            season: report.season,
            week: report.week,
            entries,
            pagination: meta,
            warning_count: report.warnings.len(),
            warnings: report.warnings,
            computed_at: report.computed_at,
        }
    }
}

pub async fn weekly(
    State(state): State<AppState>,
    Path((season, week)): Path<(u32, u32)>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let report = state.engine.weekly_leaderboard(season, week)?;
    Ok(Json(LeaderboardResponse::paged(report, &params)))
}

pub async fn season(
    State(state): State<AppState>,
    Path(season): Path<u32>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let report = state.engine.season_leaderboard(season)?;
    Ok(Json(LeaderboardResponse::paged(report, &params)))
}

pub async fn best_finish(
    State(state): State<AppState>,
    Path(season): Path<u32>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let report = state.engine.best_finish_leaderboard(season)?;
    Ok(Json(LeaderboardResponse::paged(report, &params)))
}

#[derive(Debug, Deserialize)]
pub struct StandingParams {
    pub week: Option<u32>,
}

pub async fn user_standing(
    State(state): State<AppState>,
    Path((season, user_id)): Path<(u32, String)>,
    Query(params): Query<StandingParams>,
) -> Result<Json<LeaderboardEntry>, ApiError> {
    let user_id = UserId::from(user_id);
    state
        .engine
        .user_standing(season, params.week, &user_id)?
        .map(Json)
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "user {} has no standing in season {}",
                user_id, season
            ))
        })
}
