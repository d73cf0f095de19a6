use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{GameResult, Pick, ScoredPick};

/// Request body for grading a single pick.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub pick: Pick,
    pub game: GameResult,
}

pub async fn score_pick(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoredPick>, ApiError> {
    let scored = state.engine.score_pick(&request.pick, &request.game)?;
    Ok(Json(scored))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::engine::{LeaderboardEngine, SharedSource, Snapshot};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn test_state() -> AppState {
        let source: SharedSource = Arc::new(Snapshot::default());
        AppState::new(LeaderboardEngine::new(source, Vec::new()), "*".to_string())
    }

    async fn post_json(body: Value) -> (StatusCode, Value) {
        let app = build_router(test_state());
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/score")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn game_body(home_score: Option<u32>, away_score: Option<u32>, status: &str) -> Value {
        json!({
            "id": "g-1",
            "season": 2024,
            "week": 3,
            "home_team": "Chiefs",
            "away_team": "Raiders",
            "spread": -3.5,
            "home_score": home_score,
            "away_score": away_score,
            "status": status,
        })
    }

    fn pick_body(team: &str, is_lock: bool) -> Value {
        json!({
            "user_id": "ann",
            "season": 2024,
            "week": 3,
            "game_id": "g-1",
            "selected_team": team,
            "is_lock": is_lock,
        })
    }

    #[tokio::test]
    async fn test_score_winning_pick() {
        let (status, json) = post_json(json!({
            "pick": pick_body("Chiefs", false),
            "game": game_body(Some(28), Some(21), "completed"),
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "scored");
        assert_eq!(json["result"], "win");
        assert_eq!(json["points"], 20);
    }

    #[tokio::test]
    async fn test_score_locked_blowout() {
        // Raiders +3.5 against a 0-35 loss: margin 38.5
        let (status, json) = post_json(json!({
            "pick": pick_body("Raiders", true),
            "game": game_body(Some(0), Some(35), "completed"),
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"], "win");
        assert_eq!(json["points"], 30);
    }

    #[tokio::test]
    async fn test_score_unplayed_game_is_pending() {
        let (status, json) = post_json(json!({
            "pick": pick_body("Chiefs", false),
            "game": game_body(None, None, "scheduled"),
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["result"], Value::Null);
        assert_eq!(json["points"], 0);
    }

    #[tokio::test]
    async fn test_score_unknown_team_is_bad_request() {
        let (status, json) = post_json(json!({
            "pick": pick_body("Broncos", false),
            "game": game_body(Some(28), Some(21), "completed"),
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }
}
