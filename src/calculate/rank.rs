//! Standard competition ranking ("1224") over total points.

use std::cmp::Reverse;

use crate::models::{LeaderboardEntry, PickTally, UserId, UserSeasonSummary, UserWeekSummary};

/// Anything that can be placed on a leaderboard.
pub trait Standing {
    fn user_id(&self) -> &UserId;

    fn tally(&self) -> &PickTally;

    /// Build this standing's leaderboard row at `rank`.
    fn entry(&self, rank: u32) -> LeaderboardEntry {
        LeaderboardEntry::from_tally(rank, self.user_id().clone(), self.tally())
    }
}

impl Standing for UserWeekSummary {
    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn tally(&self) -> &PickTally {
        &self.tally
    }
}

impl Standing for UserSeasonSummary {
    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn tally(&self) -> &PickTally {
        &self.tally
    }
}

/// Rank standings by total points, highest first.
///
/// Users without any picks in the window are left off entirely. Tied users
/// share a rank and the next rank skips past the tied group. The sort is
/// stable, so tied users keep the order they were given in.
pub fn rank<S: Standing>(standings: &[S]) -> Vec<LeaderboardEntry> {
    let mut ordered: Vec<&S> = standings.iter().filter(|s| s.tally().has_picks()).collect();
    ordered.sort_by_key(|s| Reverse(s.tally().points));

    let mut entries = Vec::with_capacity(ordered.len());
    let mut current_rank = 0;
    let mut previous_points = None;

    for (position, standing) in ordered.into_iter().enumerate() {
        let points = standing.tally().points;
        if previous_points != Some(points) {
            current_rank = position as u32 + 1;
            previous_points = Some(points);
        }
        entries.push(standing.entry(current_rank));
    }

    entries
}
