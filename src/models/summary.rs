//! Per-user folds of graded picks.

use serde::{Deserialize, Serialize};

use super::{PickResult, ScoredPick, UserId};

/// Win/loss/push record against the spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
}

impl Record {
    pub fn new(wins: u32, losses: u32, pushes: u32) -> Self {
        Self {
            wins,
            losses,
            pushes,
        }
    }

    /// Graded picks in this record.
    pub fn total(&self) -> u32 {
        self.wins
            .saturating_add(self.losses)
            .saturating_add(self.pushes)
    }

    pub fn add(&mut self, result: PickResult) {
        let count = match result {
            PickResult::Win => &mut self.wins,
            PickResult::Loss => &mut self.losses,
            PickResult::Push => &mut self.pushes,
        };
        *count = count.saturating_add(1);
    }

    pub fn merge(&mut self, other: &Record) {
        self.wins = self.wins.saturating_add(other.wins);
        self.losses = self.losses.saturating_add(other.losses);
        self.pushes = self.pushes.saturating_add(other.pushes);
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.pushes)
    }
}

/// Counts and points accumulated over any set of picks.
///
/// Folding is commutative and associative, so the same picks in any order
/// produce the same tally. Counters saturate instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PickTally {
    /// All submitted picks, pending included
    pub total_picks: u32,
    pub pending_picks: u32,
    pub record: Record,
    pub lock_record: Record,
    pub points: u32,
}

impl PickTally {
    pub fn add(&mut self, pick: &ScoredPick) {
        self.total_picks = self.total_picks.saturating_add(1);
        match pick.result {
            None => self.pending_picks = self.pending_picks.saturating_add(1),
            Some(result) => {
                self.record.add(result);
                if pick.pick.is_lock {
                    self.lock_record.add(result);
                }
                self.points = self.points.saturating_add(pick.points);
            }
        }
    }

    pub fn merge(&mut self, other: &PickTally) {
        self.total_picks = self.total_picks.saturating_add(other.total_picks);
        self.pending_picks = self.pending_picks.saturating_add(other.pending_picks);
        self.record.merge(&other.record);
        self.lock_record.merge(&other.lock_record);
        self.points = self.points.saturating_add(other.points);
    }

    /// True when the user submitted at least one pick.
    pub fn has_picks(&self) -> bool {
        self.total_picks > 0
    }
}

/// One user's tally for a single week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWeekSummary {
    pub user_id: UserId,
    pub season: u32,
    pub week: u32,
    pub tally: PickTally,
}

/// One user's tally across several weeks of a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSeasonSummary {
    pub user_id: UserId,
    pub season: u32,
    /// Weeks in which the user submitted picks, ascending
    pub weeks: Vec<u32>,
    pub tally: PickTally,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pick, PickOutcome};

    fn scored(result: PickResult, points: u32, lock: bool) -> ScoredPick {
        let mut pick = Pick::new("u".into(), 2024, 1, "g".into(), "A".to_string());
        pick.is_lock = lock;
        ScoredPick::scored(pick, PickOutcome::new(result, points))
    }

    #[test]
    fn test_record_display() {
        assert_eq!(Record::new(9, 4, 1).to_string(), "9-4-1");
        assert_eq!(Record::default().to_string(), "0-0-0");
    }

    #[test]
    fn test_record_add() {
        let mut record = Record::default();
        record.add(PickResult::Win);
        record.add(PickResult::Win);
        record.add(PickResult::Push);
        assert_eq!(record, Record::new(2, 0, 1));
        assert_eq!(record.total(), 3);
    }

    #[test]
    fn test_tally_counts_locks_separately() {
        let mut tally = PickTally::default();
        tally.add(&scored(PickResult::Win, 26, true));
        tally.add(&scored(PickResult::Loss, 0, false));

        assert_eq!(tally.record, Record::new(1, 1, 0));
        assert_eq!(tally.lock_record, Record::new(1, 0, 0));
        assert_eq!(tally.points, 26);
    }

    #[test]
    fn test_tally_pending_counts_as_submitted() {
        let mut tally = PickTally::default();
        tally.add(&ScoredPick::pending(Pick::new(
            "u".into(),
            2024,
            1,
            "g".into(),
            "A".to_string(),
        )));

        assert!(tally.has_picks());
        assert_eq!(tally.total_picks, 1);
        assert_eq!(tally.pending_picks, 1);
        assert_eq!(tally.record.total(), 0);
        assert_eq!(tally.points, 0);
    }

    #[test]
    fn test_tally_merge() {
        let mut a = PickTally::default();
        a.add(&scored(PickResult::Win, 20, false));
        let mut b = PickTally::default();
        b.add(&scored(PickResult::Push, 10, true));

        a.merge(&b);
        assert_eq!(a.total_picks, 2);
        assert_eq!(a.record, Record::new(1, 0, 1));
        assert_eq!(a.lock_record, Record::new(0, 0, 1));
        assert_eq!(a.points, 30);
    }

    #[test]
    fn test_tally_points_saturate() {
        let mut tally = PickTally::default();
        tally.add(&scored(PickResult::Win, u32::MAX, false));
        tally.add(&scored(PickResult::Win, 20, false));
        assert_eq!(tally.points, u32::MAX);

        let mut other = PickTally::default();
        other.add(&scored(PickResult::Win, 20, false));
        other.merge(&tally);
        assert_eq!(other.points, u32::MAX);
        assert_eq!(other.record, Record::new(3, 0, 0));
    }
}
