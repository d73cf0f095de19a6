//! Merging registered and anonymous picks into one graded list per user.
//!
//! Each (user, game) keeps exactly one pick. When both the registered and the
//! anonymous list supplied one, the registered pick is kept and the anonymous
//! duplicate dropped. Picks
//! that already carry an upstream grade pass through untouched; the rest are
//! graded against the game snapshot, or left pending if the game is not final.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use super::outcome::{self, ScoreError};
use crate::models::{
    GameId, GameResult, Pick, PickId, ScoredPick, ScoringWarning, UserId, WarningKind,
};

/// Picks for one week partitioned by origin, as returned by the pick store.
#[derive(Debug, Clone, Default)]
pub struct PickSet {
    pub registered: Vec<Pick>,
    pub anonymous: Vec<Pick>,
}

impl PickSet {
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty() && self.anonymous.is_empty()
    }

    /// Split this set into per-user sets, ordered by user id.
    pub fn by_user(&self) -> BTreeMap<UserId, PickSet> {
        let mut users: BTreeMap<UserId, PickSet> = BTreeMap::new();
        for pick in &self.registered {
            users
                .entry(pick.user_id.clone())
                .or_default()
                .registered
                .push(pick.clone());
        }
        for pick in &self.anonymous {
            users
                .entry(pick.user_id.clone())
                .or_default()
                .anonymous
                .push(pick.clone());
        }
        users
    }
}

/// Graded picks plus every pick skipped for integrity reasons.
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub picks: Vec<ScoredPick>,
    pub warnings: Vec<ScoringWarning>,
}

/// Reconcile one user's picks for one week.
///
/// Precedence follows the list a pick was passed in, not its `origin` tag.
/// Registered picks are visited first, so the first pick seen for a game is
/// the one kept. Output keeps registered picks in input order, then
/// surviving anonymous picks in input order.
pub fn reconcile(
    user_id: &UserId,
    week: u32,
    season: u32,
    registered: &[Pick],
    anonymous: &[Pick],
    games: &[GameResult],
) -> Reconciled {
    let mut warnings = Vec::new();

    let mut chosen: Vec<&Pick> = Vec::new();
    let mut seen: HashSet<PickId> = HashSet::new();

    let tagged = registered
        .iter()
        .map(|p| (p, "registered"))
        .chain(anonymous.iter().map(|p| (p, "anonymous")));

    for (pick, source) in tagged {
        if &pick.user_id != user_id || pick.week != week || pick.season != season {
            let warning = ScoringWarning::for_pick(
                WarningKind::MismatchedPick,
                pick,
                format!(
                    "pick belongs to {} season {} week {}, expected {} season {} week {}",
                    pick.user_id, pick.season, pick.week, user_id, season, week
                ),
            );
            warn!("{}", warning);
            warnings.push(warning);
            continue;
        }

        if seen.insert(pick.id()) {
            chosen.push(pick);
        } else {
            debug!(
                "Dropping duplicate {} pick for user {} game {}",
                source, user_id, pick.game_id
            );
        }
    }

    let games_by_id: HashMap<&GameId, &GameResult> = games.iter().map(|g| (&g.id, g)).collect();
    let mut picks = Vec::with_capacity(chosen.len());

    for pick in chosen {
        if let Some(graded) = pick.outcome {
            if outcome::is_attainable(graded, pick.is_lock) {
                picks.push(ScoredPick::scored(pick.clone(), graded));
            } else {
                let warning = ScoringWarning::for_pick(
                    WarningKind::InvalidOutcome,
                    pick,
                    format!(
                        "upstream grade {} for {} points cannot occur{}",
                        graded.result,
                        graded.points,
                        if pick.is_lock { " on a lock" } else { "" }
                    ),
                );
                warn!("{}", warning);
                warnings.push(warning);
            }
            continue;
        }

        let Some(game) = games_by_id.get(&pick.game_id) else {
            let warning = ScoringWarning::for_pick(
                WarningKind::UnknownGame,
                pick,
                format!("no result record for game {}", pick.game_id),
            );
            warn!("{}", warning);
            warnings.push(warning);
            continue;
        };

        match outcome::score(pick, game) {
            Ok(graded) => picks.push(ScoredPick::scored(pick.clone(), graded)),
            Err(ScoreError::NotFinal(_)) => picks.push(ScoredPick::pending(pick.clone())),
            Err(err @ ScoreError::UnknownTeam { .. }) => {
                let warning =
                    ScoringWarning::for_pick(WarningKind::UnknownTeam, pick, err.to_string());
                warn!("{}", warning);
                warnings.push(warning);
            }
        }
    }

    Reconciled { picks, warnings }
}

/// Reconcile every user's picks for a week.
///
/// Users appear in id order. A user whose picks were all skipped still gets
/// an (empty) entry so callers can see they took part.
pub fn reconcile_week(
    season: u32,
    week: u32,
    picks: &PickSet,
    games: &[GameResult],
) -> (BTreeMap<UserId, Vec<ScoredPick>>, Vec<ScoringWarning>) {
    let mut by_user = BTreeMap::new();
    let mut warnings = Vec::new();

    for (user_id, set) in picks.by_user() {
        let reconciled = reconcile(&user_id, week, season, &set.registered, &set.anonymous, games);
        warnings.extend(reconciled.warnings);
        by_user.insert(user_id, reconciled.picks);
    }

    (by_user, warnings)
}
