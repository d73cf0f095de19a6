//! Leaderboard read-models.

use serde::{Deserialize, Serialize};

use super::{PickTally, Record, UserId};

/// Which standings a leaderboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardScope {
    Weekly,
    Season,
    BestFinish,
}

impl std::fmt::Display for LeaderboardScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardScope::Weekly => write!(f, "weekly"),
            LeaderboardScope::Season => write!(f, "season"),
            LeaderboardScope::BestFinish => write!(f, "best_finish"),
        }
    }
}

impl std::str::FromStr for LeaderboardScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weekly" | "week" => Ok(LeaderboardScope::Weekly),
            "season" => Ok(LeaderboardScope::Season),
            "best_finish" => Ok(LeaderboardScope::BestFinish),
            other => Err(format!(
                "unknown leaderboard view '{}' (expected weekly, season or best-finish)",
                other
            )),
        }
    }
}

/// One week's contribution to a best-finish total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBreakdown {
    pub week: u32,
    pub points: u32,
    pub total_picks: u32,
    pub record: Record,
    pub lock_record: Record,
}

/// Extra fields carried by best-finish entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestFinishDetail {
    pub included_weeks: Vec<u32>,
    /// Lowest single-week point total among the included weeks
    pub worst_week_score: u32,
    pub per_week: Vec<WeekBreakdown>,
}

/// A ranked row in a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based competition rank; tied users share a rank
    pub rank: u32,
    pub user_id: UserId,
    pub total_points: u32,
    /// Overall record, e.g. "9-4-1"
    pub record: String,
    pub lock_record: String,
    pub total_picks: u32,
    pub pending_picks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_finish: Option<BestFinishDetail>,
}

impl LeaderboardEntry {
    pub fn from_tally(rank: u32, user_id: UserId, tally: &PickTally) -> Self {
        Self {
            rank,
            user_id,
            total_points: tally.points,
            record: tally.record.to_string(),
            lock_record: tally.lock_record.to_string(),
            total_picks: tally.total_picks,
            pending_picks: tally.pending_picks,
            best_finish: None,
        }
    }
}
