//! Best-finish standings over a fixed set of late-season weeks.
//!
//! Every eligible week counts toward the total, including weeks the user
//! skipped (which contribute zero). The lowest single week is reported
//! alongside the total but is not dropped from it.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::rank::Standing;
use crate::models::{
    BestFinishDetail, LeaderboardEntry, PickTally, UserId, UserWeekSummary, WeekBreakdown,
};

/// One user's best-finish result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestFinishSummary {
    pub user_id: UserId,
    pub season: u32,
    pub included_weeks: Vec<u32>,
    /// Sum over all included weeks
    pub tally: PickTally,
    pub worst_week_score: u32,
    pub per_week: Vec<WeekBreakdown>,
}

impl BestFinishSummary {
    pub fn total_points(&self) -> u32 {
        self.tally.points
    }
}

impl Standing for BestFinishSummary {
    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn tally(&self) -> &PickTally {
        &self.tally
    }

    fn entry(&self, rank: u32) -> LeaderboardEntry {
        let mut entry = LeaderboardEntry::from_tally(rank, self.user_id.clone(), &self.tally);
        entry.best_finish = Some(BestFinishDetail {
            included_weeks: self.included_weeks.clone(),
            worst_week_score: self.worst_week_score,
            per_week: self.per_week.clone(),
        });
        entry
    }
}

/// Compute a user's best-finish summary.
///
/// `weekly` holds this user's summaries keyed by week; missing weeks count as
/// zero. Returns `None` if the user has no picks in any eligible week, or if
/// no weeks are eligible.
pub fn select_best_finish(
    user_id: &UserId,
    season: u32,
    eligible_weeks: &[u32],
    weekly: &BTreeMap<u32, UserWeekSummary>,
) -> Option<BestFinishSummary> {
    let weeks: BTreeSet<u32> = eligible_weeks.iter().copied().collect();

    let mut tally = PickTally::default();
    let mut per_week = Vec::with_capacity(weeks.len());

    for &week in &weeks {
        let week_tally = weekly.get(&week).map(|s| s.tally).unwrap_or_default();
        tally.merge(&week_tally);
        per_week.push(WeekBreakdown {
            week,
            points: week_tally.points,
            total_picks: week_tally.total_picks,
            record: week_tally.record,
            lock_record: week_tally.lock_record,
        });
    }

    if !tally.has_picks() {
        return None;
    }

    let worst_week_score = per_week.iter().map(|w| w.points).min().unwrap_or(0);

    Some(BestFinishSummary {
        user_id: user_id.clone(),
        season,
        included_weeks: weeks.into_iter().collect(),
        tally,
        worst_week_score,
        per_week,
    })
}
