//! Data-integrity warnings surfaced alongside best-effort results.

use serde::{Deserialize, Serialize};

use super::{GameId, Pick, UserId};

/// Kind of integrity problem found while grading picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Pick references a game id with no result record
    UnknownGame,
    /// Pick names a team that plays in neither side of its game
    UnknownTeam,
    /// Pick was handed to the wrong (user, season, week) batch
    MismatchedPick,
    /// Upstream grade that no final score could produce
    InvalidOutcome,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningKind::UnknownGame => write!(f, "unknown_game"),
            WarningKind::UnknownTeam => write!(f, "unknown_team"),
            WarningKind::MismatchedPick => write!(f, "mismatched_pick"),
            WarningKind::InvalidOutcome => write!(f, "invalid_outcome"),
        }
    }
}

/// A skipped pick and why it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWarning {
    pub kind: WarningKind,
    pub user_id: UserId,
    pub season: u32,
    pub week: u32,
    pub game_id: GameId,
    pub message: String,
}

impl ScoringWarning {
    pub fn for_pick(kind: WarningKind, pick: &Pick, message: String) -> Self {
        Self {
            kind,
            user_id: pick.user_id.clone(),
            season: pick.season,
            week: pick.week,
            game_id: pick.game_id.clone(),
            message,
        }
    }
}

impl std::fmt::Display for ScoringWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] user={} season={} week={} game={}: {}",
            self.kind, self.user_id, self.season, self.week, self.game_id, self.message
        )
    }
}
