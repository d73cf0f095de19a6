//! Game results as supplied by the schedule/score store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GameId;

/// Completion status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Scheduled => write!(f, "scheduled"),
            GameStatus::InProgress => write!(f, "in_progress"),
            GameStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Which side of a game a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// A single contest and, once played, its final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub id: GameId,

    pub season: u32,

    pub week: u32,

    pub home_team: String,

    pub away_team: String,

    /// Point spread relative to the home team (negative = home favored)
    pub spread: f64,

    pub home_score: Option<u32>,

    pub away_score: Option<u32>,

    #[serde(default)]
    pub status: GameStatus,

    /// Scheduled kickoff, if known
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
}

/// Final scores of a game that can be graded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalScore {
    pub home: u32,
    pub away: u32,
    pub spread: f64,
}

impl GameResult {
    /// Create a scheduled game with no scores.
    pub fn new(
        id: GameId,
        season: u32,
        week: u32,
        home_team: String,
        away_team: String,
        spread: f64,
    ) -> Self {
        Self {
            id,
            season,
            week,
            home_team,
            away_team,
            spread,
            home_score: None,
            away_score: None,
            status: GameStatus::Scheduled,
            kickoff: None,
        }
    }

    /// Builder method to mark the game completed with final scores.
    pub fn with_final_score(mut self, home: u32, away: u32) -> Self {
        self.home_score = Some(home);
        self.away_score = Some(away);
        self.status = GameStatus::Completed;
        self
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_kickoff(mut self, kickoff: DateTime<Utc>) -> Self {
        self.kickoff = Some(kickoff);
        self
    }

    /// The final score, if this game can be graded.
    ///
    /// A completed game missing either score is treated as not yet
    /// scorable rather than as a push or loss.
    pub fn final_score(&self) -> Option<FinalScore> {
        if self.status != GameStatus::Completed {
            return None;
        }
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some(FinalScore {
                home,
                away,
                spread: self.spread,
            }),
            _ => None,
        }
    }

    pub fn is_scorable(&self) -> bool {
        self.final_score().is_some()
    }

    /// Resolve a team name to the side it played on (case-insensitive).
    pub fn side_of(&self, team: &str) -> Option<Side> {
        let team = team.trim();
        if team.eq_ignore_ascii_case(self.home_team.trim()) {
            Some(Side::Home)
        } else if team.eq_ignore_ascii_case(self.away_team.trim()) {
            Some(Side::Away)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameResult {
        GameResult::new(
            GameId::from("g-1"),
            2024,
            1,
            "Kansas City".to_string(),
            "Baltimore".to_string(),
            -3.0,
        )
    }

    #[test]
    fn test_scheduled_game_not_scorable() {
        let g = game();
        assert_eq!(g.status, GameStatus::Scheduled);
        assert!(!g.is_scorable());
    }

    #[test]
    fn test_completed_game_scorable() {
        let g = game().with_final_score(27, 20);
        let score = g.final_score().unwrap();
        assert_eq!(score.home, 27);
        assert_eq!(score.away, 20);
        assert_eq!(score.spread, -3.0);
    }

    #[test]
    fn test_completed_without_both_scores_not_scorable() {
        let mut g = game().with_status(GameStatus::Completed);
        g.home_score = Some(14);
        assert!(!g.is_scorable());
    }

    #[test]
    fn test_in_progress_with_scores_not_scorable() {
        let g = game()
            .with_final_score(10, 7)
            .with_status(GameStatus::InProgress);
        assert!(!g.is_scorable());
    }

    #[test]
    fn test_side_of() {
        let g = game();
        assert_eq!(g.side_of("Kansas City"), Some(Side::Home));
        assert_eq!(g.side_of("baltimore"), Some(Side::Away));
        assert_eq!(g.side_of(" Baltimore "), Some(Side::Away));
        assert_eq!(g.side_of("Denver"), None);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&GameStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(GameStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_game_deserialize_defaults() {
        let json = r#"{
            "id": "g-9", "season": 2024, "week": 2,
            "home_team": "A", "away_team": "B", "spread": 0.0,
            "home_score": null, "away_score": null
        }"#;
        let g: GameResult = serde_json::from_str(json).unwrap();
        assert_eq!(g.status, GameStatus::Scheduled);
        assert!(g.kickoff.is_none());
    }
}
