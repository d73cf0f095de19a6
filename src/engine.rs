//! Leaderboard operations over a pick/game collaborator.
//!
//! Each call pulls a fresh snapshot from the [`PoolSource`], grades it and
//! returns a new report. Nothing is cached or mutated between calls, so
//! concurrent requests need no coordination.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::calculate::{
    self, aggregate_season, rank, reconcile_week, select_best_finish, summarize_week, PickSet,
    ScoreError,
};
use crate::config::SeasonConfig;
use crate::models::{
    GameId, GameResult, LeaderboardEntry, LeaderboardScope, Pick, PickOrigin, ScoredPick,
    ScoringWarning, UserId, UserWeekSummary,
};
use crate::storage::StorageError;

/// Source of game results and picks for a season week.
pub trait PoolSource {
    /// Game results scheduled in `week` of `season`.
    fn games(&self, season: u32, week: u32) -> Result<Vec<GameResult>, StorageError>;

    /// Every user's picks for `week` of `season`, split by origin.
    fn picks(&self, season: u32, week: u32) -> Result<PickSet, StorageError>;
}

/// A source shared across request handlers.
pub type SharedSource = Arc<dyn PoolSource + Send + Sync>;

impl<T: PoolSource + ?Sized> PoolSource for Arc<T> {
    fn games(&self, season: u32, week: u32) -> Result<Vec<GameResult>, StorageError> {
        (**self).games(season, week)
    }

    fn picks(&self, season: u32, week: u32) -> Result<PickSet, StorageError> {
        (**self).picks(season, week)
    }
}

/// An in-memory snapshot of a season's games and picks.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub games: Vec<GameResult>,
    pub picks: Vec<Pick>,
}

impl Snapshot {
    pub fn new(games: Vec<GameResult>, picks: Vec<Pick>) -> Self {
        Self { games, picks }
    }
}

impl PoolSource for Snapshot {
    fn games(&self, season: u32, week: u32) -> Result<Vec<GameResult>, StorageError> {
        Ok(self
            .games
            .iter()
            .filter(|g| g.season == season && g.week == week)
            .cloned()
            .collect())
    }

    fn picks(&self, season: u32, week: u32) -> Result<PickSet, StorageError> {
        Ok(partition_picks(
            self.picks
                .iter()
                .filter(|p| p.season == season && p.week == week)
                .cloned(),
        ))
    }
}

/// Split picks into registered and anonymous-attributed sets.
pub fn partition_picks<I>(picks: I) -> PickSet
where
    I: IntoIterator<Item = Pick>,
{
    let mut set = PickSet::default();
    for pick in picks {
        match pick.origin {
            PickOrigin::Registered => set.registered.push(pick),
            PickOrigin::AnonymousAttributed { .. } => set.anonymous.push(pick),
        }
    }
    set
}

/// Engine errors that abort a whole request.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown season: {0}")]
    UnknownSeason(u32),

    #[error("Invalid week {week} for season {season} (expected 1-{weeks})")]
    InvalidWeek { season: u32, week: u32, weeks: u32 },

    #[error("Pick is for game {pick_game} but game {game} was supplied")]
    GameMismatch { pick_game: GameId, game: GameId },

    #[error("Pick cannot be scored: {0}")]
    Unscorable(#[from] ScoreError),

    #[error("Storage error: {0}")]
    Source(#[from] StorageError),
}

/// A computed leaderboard plus every integrity warning hit on the way.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardReport {
    pub scope: LeaderboardScope,
    pub season: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,
    pub entries: Vec<LeaderboardEntry>,
    pub warnings: Vec<ScoringWarning>,
    pub computed_at: DateTime<Utc>,
}

impl LeaderboardReport {
    fn new(
        scope: LeaderboardScope,
        season: u32,
        week: Option<u32>,
        entries: Vec<LeaderboardEntry>,
        warnings: Vec<ScoringWarning>,
    ) -> Self {
        Self {
            scope,
            season,
            week,
            entries,
            warnings,
            computed_at: Utc::now(),
        }
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn entry_for(&self, user_id: &UserId) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| &e.user_id == user_id)
    }
}

/// Weekly, season and best-finish leaderboards for configured seasons.
#[derive(Debug, Clone)]
pub struct LeaderboardEngine<S> {
    source: S,
    seasons: Vec<SeasonConfig>,
}

impl<S: PoolSource> LeaderboardEngine<S> {
    pub fn new(source: S, seasons: Vec<SeasonConfig>) -> Self {
        Self { source, seasons }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn seasons(&self) -> &[SeasonConfig] {
        &self.seasons
    }

    pub fn season_config(&self, season: u32) -> Result<&SeasonConfig, EngineError> {
        self.seasons
            .iter()
            .find(|s| s.year == season)
            .ok_or(EngineError::UnknownSeason(season))
    }

    fn check_week(&self, season: u32, week: u32) -> Result<(), EngineError> {
        let config = self.season_config(season)?;
        if !config.contains_week(week) {
            return Err(EngineError::InvalidWeek {
                season,
                week,
                weeks: config.weeks,
            });
        }
        Ok(())
    }

    /// Grade every user's picks for one week.
    fn reconciled_week(
        &self,
        season: u32,
        week: u32,
    ) -> Result<(BTreeMap<UserId, Vec<ScoredPick>>, Vec<ScoringWarning>), EngineError> {
        let games = self.source.games(season, week)?;
        let picks = self.source.picks(season, week)?;
        debug!(
            "Season {} week {}: {} games, {} registered picks, {} anonymous picks",
            season,
            week,
            games.len(),
            picks.registered.len(),
            picks.anonymous.len()
        );
        Ok(reconcile_week(season, week, &picks, &games))
    }

    /// Per-user summaries for one week.
    pub fn week_summaries(
        &self,
        season: u32,
        week: u32,
    ) -> Result<(Vec<UserWeekSummary>, Vec<ScoringWarning>), EngineError> {
        self.check_week(season, week)?;
        let (by_user, warnings) = self.reconciled_week(season, week)?;
        Ok((summarize_week(season, week, &by_user), warnings))
    }

    /// Standings for a single week.
    pub fn weekly_leaderboard(
        &self,
        season: u32,
        week: u32,
    ) -> Result<LeaderboardReport, EngineError> {
        let (summaries, warnings) = self.week_summaries(season, week)?;
        let entries = rank(&summaries);

        info!(
            "Weekly leaderboard season {} week {}: {} entries, {} warnings",
            season,
            week,
            entries.len(),
            warnings.len()
        );
        Ok(LeaderboardReport::new(
            LeaderboardScope::Weekly,
            season,
            Some(week),
            entries,
            warnings,
        ))
    }

    /// Cumulative standings over every week of the season.
    pub fn season_leaderboard(&self, season: u32) -> Result<LeaderboardReport, EngineError> {
        let weeks = self.season_config(season)?.weeks;

        let mut by_user: BTreeMap<UserId, BTreeMap<u32, Vec<ScoredPick>>> = BTreeMap::new();
        let mut warnings = Vec::new();

        for week in 1..=weeks {
            let (week_picks, week_warnings) = self.reconciled_week(season, week)?;
            warnings.extend(week_warnings);
            for (user_id, picks) in week_picks {
                by_user.entry(user_id).or_default().insert(week, picks);
            }
        }

        let summaries: Vec<_> = by_user
            .iter()
            .map(|(user_id, picks_by_week)| aggregate_season(user_id, season, picks_by_week))
            .collect();
        let entries = rank(&summaries);

        info!(
            "Season leaderboard season {}: {} entries over {} weeks, {} warnings",
            season,
            entries.len(),
            weeks,
            warnings.len()
        );
        Ok(LeaderboardReport::new(
            LeaderboardScope::Season,
            season,
            None,
            entries,
            warnings,
        ))
    }

    /// Standings over the season's configured best-finish weeks.
    ///
    /// A season with no best-finish weeks yields an empty leaderboard.
    pub fn best_finish_leaderboard(&self, season: u32) -> Result<LeaderboardReport, EngineError> {
        let eligible: BTreeSet<u32> = self
            .season_config(season)?
            .best_finish_weeks
            .iter()
            .copied()
            .collect();
        let eligible: Vec<u32> = eligible.into_iter().collect();

        let mut by_user: BTreeMap<UserId, BTreeMap<u32, UserWeekSummary>> = BTreeMap::new();
        let mut warnings = Vec::new();

        for &week in &eligible {
            let (summaries, week_warnings) = self.week_summaries(season, week)?;
            warnings.extend(week_warnings);
            for summary in summaries {
                by_user
                    .entry(summary.user_id.clone())
                    .or_default()
                    .insert(week, summary);
            }
        }

        let standings: Vec<_> = by_user
            .iter()
            .filter_map(|(user_id, weekly)| select_best_finish(user_id, season, &eligible, weekly))
            .collect();
        let entries = rank(&standings);

        info!(
            "Best-finish leaderboard season {} weeks {:?}: {} entries, {} warnings",
            season,
            eligible,
            entries.len(),
            warnings.len()
        );
        Ok(LeaderboardReport::new(
            LeaderboardScope::BestFinish,
            season,
            None,
            entries,
            warnings,
        ))
    }

    /// One user's row in the weekly (when `week` is given) or season view.
    pub fn user_standing(
        &self,
        season: u32,
        week: Option<u32>,
        user_id: &UserId,
    ) -> Result<Option<LeaderboardEntry>, EngineError> {
        let report = match week {
            Some(week) => self.weekly_leaderboard(season, week)?,
            None => self.season_leaderboard(season)?,
        };
        Ok(report.entry_for(user_id).cloned())
    }

    /// Grade a single pick on demand.
    ///
    /// Always grades from the game, ignoring any upstream grade on the pick,
    /// so the two can be compared. A game that is not final yields a pending
    /// pick.
    pub fn score_pick(&self, pick: &Pick, game: &GameResult) -> Result<ScoredPick, EngineError> {
        score_pick(pick, game)
    }
}

/// Grade a single pick against its game. See [`LeaderboardEngine::score_pick`].
pub fn score_pick(pick: &Pick, game: &GameResult) -> Result<ScoredPick, EngineError> {
    if pick.game_id != game.id {
        return Err(EngineError::GameMismatch {
            pick_game: pick.game_id.clone(),
            game: game.id.clone(),
        });
    }

    match calculate::score(pick, game) {
        Ok(outcome) => Ok(ScoredPick::scored(pick.clone(), outcome)),
        Err(ScoreError::NotFinal(_)) => Ok(ScoredPick::pending(pick.clone())),
        Err(err) => Err(err.into()),
    }
}
