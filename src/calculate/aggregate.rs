//! Folding graded picks into per-user summaries.

use std::collections::BTreeMap;

use crate::models::{PickTally, ScoredPick, UserId, UserSeasonSummary, UserWeekSummary};

/// Fold any set of picks into a tally.
///
/// Pending picks count toward `total_picks` only.
pub fn aggregate<'a, I>(picks: I) -> PickTally
where
    I: IntoIterator<Item = &'a ScoredPick>,
{
    picks.into_iter().fold(PickTally::default(), |mut tally, pick| {
        tally.add(pick);
        tally
    })
}

/// Summarize one user's week. A user with no picks gets a zero summary.
pub fn aggregate_week(
    user_id: &UserId,
    season: u32,
    week: u32,
    picks: &[ScoredPick],
) -> UserWeekSummary {
    UserWeekSummary {
        user_id: user_id.clone(),
        season,
        week,
        tally: aggregate(picks),
    }
}

/// Summarize one user's picks across several weeks.
pub fn aggregate_season(
    user_id: &UserId,
    season: u32,
    picks_by_week: &BTreeMap<u32, Vec<ScoredPick>>,
) -> UserSeasonSummary {
    let weeks = picks_by_week
        .iter()
        .filter(|(_, picks)| !picks.is_empty())
        .map(|(week, _)| *week)
        .collect();

    UserSeasonSummary {
        user_id: user_id.clone(),
        season,
        weeks,
        tally: aggregate(picks_by_week.values().flatten()),
    }
}

/// Week summaries for every user in a reconciled week, in user order.
pub fn summarize_week(
    season: u32,
    week: u32,
    picks_by_user: &BTreeMap<UserId, Vec<ScoredPick>>,
) -> Vec<UserWeekSummary> {
    picks_by_user
        .iter()
        .map(|(user_id, picks)| aggregate_week(user_id, season, week, picks))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pick, PickOutcome, PickResult, Record};

    fn graded(game: &str, result: PickResult, points: u32, lock: bool) -> ScoredPick {
        let mut pick = Pick::new("ann".into(), 2024, 2, game.into(), "X".to_string());
        pick.is_lock = lock;
        ScoredPick::scored(pick, PickOutcome::new(result, points))
    }

    fn pending(game: &str) -> ScoredPick {
        ScoredPick::pending(Pick::new("ann".into(), 2024, 2, game.into(), "X".to_string()))
    }

    fn sample() -> Vec<ScoredPick> {
        vec![
            graded("g-1", PickResult::Win, 26, true),
            graded("g-2", PickResult::Loss, 0, false),
            graded("g-3", PickResult::Push, 10, false),
            graded("g-4", PickResult::Win, 21, false),
            graded("g-5", PickResult::Loss, 0, true),
            pending("g-6"),
        ]
    }

    #[test]
    fn test_aggregate_week() {
        let summary = aggregate_week(&"ann".into(), 2024, 2, &sample());

        assert_eq!(summary.tally.total_picks, 6);
        assert_eq!(summary.tally.pending_picks, 1);
        assert_eq!(summary.tally.record, Record::new(2, 2, 1));
        assert_eq!(summary.tally.lock_record, Record::new(1, 1, 0));
        assert_eq!(summary.tally.points, 57);
    }

    #[test]
    fn test_aggregate_empty_is_zero_summary() {
        let summary = aggregate_week(&"ann".into(), 2024, 2, &[]);
        assert_eq!(summary.tally, PickTally::default());
        assert_eq!(summary.tally.record.to_string(), "0-0-0");
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let picks = sample();
        let expected = aggregate(&picks);

        // every rotation and the reversal of each
        for shift in 0..picks.len() {
            let mut rotated = picks.clone();
            rotated.rotate_left(shift);
            assert_eq!(aggregate(&rotated), expected);
            rotated.reverse();
            assert_eq!(aggregate(&rotated), expected);
        }
    }

    #[test]
    fn test_aggregate_is_associative_over_splits() {
        let picks = sample();
        let whole = aggregate(&picks);

        for split in 0..=picks.len() {
            let (left, right) = picks.split_at(split);
            let mut merged = aggregate(left);
            merged.merge(&aggregate(right));
            assert_eq!(merged, whole);
        }
    }

    #[test]
    fn test_aggregate_season() {
        let mut by_week = BTreeMap::new();
        by_week.insert(1, vec![graded("g-1", PickResult::Win, 20, false)]);
        by_week.insert(2, vec![]);
        by_week.insert(3, vec![graded("g-9", PickResult::Push, 10, true)]);

        let summary = aggregate_season(&"ann".into(), 2024, &by_week);

        assert_eq!(summary.weeks, vec![1, 3]);
        assert_eq!(summary.tally.points, 30);
        assert_eq!(summary.tally.record, Record::new(1, 0, 1));
        assert_eq!(summary.tally.lock_record, Record::new(0, 0, 1));
    }

    #[test]
    fn test_summarize_week_keeps_user_order() {
        let mut by_user = BTreeMap::new();
        by_user.insert(UserId::from("zed"), vec![graded("g-1", PickResult::Win, 20, false)]);
        by_user.insert(UserId::from("amy"), vec![]);

        let summaries = summarize_week(2024, 2, &by_user);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].user_id, UserId::from("amy"));
        assert!(!summaries[0].tally.has_picks());
        assert_eq!(summaries[1].tally.points, 20);
    }
}
